pub(crate) const TEST_REPO: &str = "octocat/hello-world";
pub(crate) const TEST_TOKEN: &str = "token";

/// Body of a GitHub commit or compare response listing `files`.
pub(crate) fn files_body(files: &[&str]) -> serde_json::Value {
    serde_json::json!({
        "files": files
            .iter()
            .map(|file| serde_json::json!({ "filename": file, "status": "modified" }))
            .collect::<Vec<_>>()
    })
}

/// Start a mock GitHub Enterprise server answering `route` (relative to the
/// test repository) with the listed files for requests bearing the test token.
macro_rules! github_test {
    ($($route:literal: [$($file:literal),*])*) => {{
        let server = ::wiremock::MockServer::start().await;
        $({
            let route = format!("/api/v3/repos/{}{}", $crate::testing::TEST_REPO, $route);
            ::wiremock::Mock::given(::wiremock::matchers::method("GET"))
                .and(::wiremock::matchers::path(route.as_str()))
                .and(::wiremock::matchers::header(
                    "authorization",
                    format!("Bearer {}", $crate::testing::TEST_TOKEN).as_str(),
                ))
                .respond_with(
                    ::wiremock::ResponseTemplate::new(200)
                        .insert_header("x-ratelimit-remaining", "4999")
                        .set_body_json($crate::testing::files_body(&[$($file),*])),
                )
                .mount(&server)
                .await;
        })*
        server
    }};
}

pub(crate) use github_test;
