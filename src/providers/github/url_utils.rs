use url::Url;

const GITHUB_WEB_HOSTS: &[&str] = &["github.com", "www.github.com"];

/// Maps `https://github.com/{owner}/{repo}/commit/{sha}` onto the commits API.
pub fn commit_api_url(api_url: &Url, link_url: &str) -> Option<Url> {
    let link = Url::parse(link_url).ok()?;
    if is_api_link(api_url, &link) {
        return Some(link);
    }
    if !is_web_link(api_url, &link) {
        return None;
    }

    match path_segments(&link).as_slice() {
        [owner, repo, "commit" | "commits", sha, ..] if !sha.is_empty() => api_url
            .join(&format!("repos/{owner}/{repo}/commits/{sha}"))
            .ok(),
        _ => None,
    }
}

/// Maps issue and pull request links onto the issues API; GitHub serves both there.
pub fn work_item_api_url(api_url: &Url, link_url: &str) -> Option<Url> {
    let link = Url::parse(link_url).ok()?;
    if is_api_link(api_url, &link) {
        return Some(link);
    }
    if !is_web_link(api_url, &link) {
        return None;
    }

    match path_segments(&link).as_slice() {
        [owner, repo, "issues" | "pull", number, ..]
            if !number.is_empty() && number.chars().all(|c| c.is_ascii_digit()) =>
        {
            api_url
                .join(&format!("repos/{owner}/{repo}/issues/{number}"))
                .ok()
        }
        _ => None,
    }
}

fn same_host(api_url: &Url, link: &Url) -> bool {
    link.host_str() == api_url.host_str()
        && link.port_or_known_default() == api_url.port_or_known_default()
}

// GitHub Enterprise serves the web UI and the API from one host.
fn is_api_link(api_url: &Url, link: &Url) -> bool {
    same_host(api_url, link) && link.path().starts_with(api_url.path())
}

fn is_web_link(api_url: &Url, link: &Url) -> bool {
    same_host(api_url, link)
        || link
            .host_str()
            .is_some_and(|host| GITHUB_WEB_HOSTS.contains(&host))
}

fn path_segments(link: &Url) -> Vec<&str> {
    link.path_segments()
        .map(|segments| segments.filter(|s| !s.is_empty()).collect())
        .unwrap_or_default()
}
