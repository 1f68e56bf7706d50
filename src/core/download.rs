use crate::error::{InstallerError, Result};
use std::io::{self, Read};
use url::Url;

pub const DEFAULT_MAX_REDIRECTS: usize = 10;

/// One HTTP response as seen by the redirect loop. The body borrows the
/// transport, so it must be dropped before the next request is issued.
pub struct Response<'a> {
    pub status: u16,
    pub location: Option<String>,
    pub content_length: Option<u64>,
    pub body: Box<dyn Read + 'a>,
}

/// Issues single GET requests. Implementations never follow redirects
/// themselves; that is the [`Downloader`]'s job.
pub trait Transport {
    fn get(&mut self, url: &Url) -> Result<Response<'_>>;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn get(&mut self, url: &Url) -> Result<Response<'_>> {
        (**self).get(url)
    }
}

pub enum FetchOutcome<'a> {
    Success(Response<'a>),
    Redirect(Url),
}

/// Sorts a response into success or redirect. Anything else is a terminal
/// failure carrying the status code.
pub fn classify<'a>(current: &Url, mut response: Response<'a>) -> Result<FetchOutcome<'a>> {
    match response.status {
        200 => Ok(FetchOutcome::Success(response)),
        301 | 302 => {
            let location =
                response
                    .location
                    .take()
                    .ok_or_else(|| InstallerError::MissingLocation {
                        status: response.status,
                        url: current.to_string(),
                    })?;

            // Lets the connection go back to the pool for the next hop.
            io::copy(&mut response.body, &mut io::sink())
                .map_err(|e| InstallerError::transport(current.as_str(), e))?;

            let next = current
                .join(location.trim())
                .map_err(|source| InstallerError::InvalidUrl {
                    url: location.clone(),
                    source,
                })?;
            Ok(FetchOutcome::Redirect(next))
        }
        status => Err(InstallerError::UnexpectedStatus {
            status,
            url: current.to_string(),
        }),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadReport {
    pub final_url: Url,
    pub redirects: usize,
    pub bytes: u64,
}

pub struct Downloader<T> {
    transport: T,
    max_redirects: usize,
}

impl<T: Transport> Downloader<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            max_redirects: DEFAULT_MAX_REDIRECTS,
        }
    }

    pub fn with_max_redirects(mut self, max_redirects: usize) -> Self {
        self.max_redirects = max_redirects;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Follows redirects from `url` until a 200 arrives, then hands its body
    /// to `consume`. `consume` is never called for a failed fetch.
    pub fn download<F>(&mut self, url: &Url, consume: F) -> Result<DownloadReport>
    where
        F: FnOnce(&mut dyn Read) -> Result<u64>,
    {
        let mut current = url.clone();
        let mut redirects = 0;

        loop {
            tracing::debug!(url = %current, hop = redirects, "requesting");
            let response = self.transport.get(&current)?;

            match classify(&current, response)? {
                FetchOutcome::Success(mut response) => {
                    tracing::debug!(
                        url = %current,
                        content_length = ?response.content_length,
                        "streaming response body"
                    );
                    let bytes = consume(response.body.as_mut())?;
                    return Ok(DownloadReport {
                        final_url: current,
                        redirects,
                        bytes,
                    });
                }
                FetchOutcome::Redirect(next) => {
                    if redirects >= self.max_redirects {
                        return Err(InstallerError::TooManyRedirects {
                            max: self.max_redirects,
                            url: next.to_string(),
                        });
                    }
                    redirects += 1;
                    println!("↪️  Redirected to {next}");
                    current = next;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::VecDeque;

    /// Replays canned responses and records what was requested.
    #[derive(Default)]
    struct Scripted {
        responses: VecDeque<(u16, Option<&'static str>, &'static [u8])>,
        requests: Vec<String>,
    }

    impl Scripted {
        fn new(responses: &[(u16, Option<&'static str>, &'static [u8])]) -> Self {
            Self {
                responses: responses.iter().copied().collect(),
                requests: Vec::new(),
            }
        }
    }

    impl Transport for Scripted {
        fn get(&mut self, url: &Url) -> Result<Response<'_>> {
            self.requests.push(url.to_string());
            let (status, location, body) = self
                .responses
                .pop_front()
                .ok_or_else(|| InstallerError::transport(url.as_str(), "script exhausted"))?;
            Ok(Response {
                status,
                location: location.map(str::to_string),
                content_length: Some(body.len() as u64),
                body: Box::new(body),
            })
        }
    }

    /// Redirects to itself forever.
    struct Looping {
        requests: usize,
    }

    impl Transport for Looping {
        fn get(&mut self, _url: &Url) -> Result<Response<'_>> {
            self.requests += 1;
            Ok(Response {
                status: 301,
                location: Some("/again".to_string()),
                content_length: Some(0),
                body: Box::new(io::empty()),
            })
        }
    }

    fn start() -> Url {
        Url::parse("https://dl.example.com/art").unwrap()
    }

    fn collect(sink: &mut Vec<u8>) -> impl FnOnce(&mut dyn Read) -> Result<u64> + '_ {
        move |body| {
            body.read_to_end(sink)
                .map(|n| n as u64)
                .map_err(|source| InstallerError::Stream { source })
        }
    }

    #[test]
    fn test_two_redirects_then_success() {
        let transport = Scripted::new(&[
            (302, Some("https://cdn.example.com/one"), b"moved"),
            (302, Some("/two"), b""),
            (200, None, b"binary"),
        ]);
        let mut downloader = Downloader::new(transport);
        let mut received = Vec::new();

        let report = downloader.download(&start(), collect(&mut received)).unwrap();

        assert_eq!(report.redirects, 2);
        assert_eq!(report.bytes, 6);
        assert_eq!(report.final_url.as_str(), "https://cdn.example.com/two");
        assert_eq!(received, b"binary");
        assert_eq!(
            downloader.transport().requests,
            vec![
                "https://dl.example.com/art",
                "https://cdn.example.com/one",
                "https://cdn.example.com/two",
            ]
        );
    }

    #[test]
    fn test_not_found_never_consumes() {
        let mut downloader = Downloader::new(Scripted::new(&[(404, None, b"nope")]));
        let mut called = false;

        let err = downloader
            .download(&start(), |_| {
                called = true;
                Ok(0)
            })
            .unwrap_err();

        assert!(matches!(err, InstallerError::UnexpectedStatus { status: 404, .. }));
        assert!(!called);
    }

    #[test]
    fn test_other_redirect_codes_are_failures() {
        for status in [303, 307, 308, 500] {
            let mut downloader =
                Downloader::new(Scripted::new(&[(status, Some("/elsewhere"), b"")]));
            let err = downloader.download(&start(), |_| Ok(0)).unwrap_err();
            assert!(
                matches!(err, InstallerError::UnexpectedStatus { status: s, .. } if s == status)
            );
        }
    }

    #[test]
    fn test_redirect_loop_is_bounded() {
        let mut downloader = Downloader::new(Looping { requests: 0 }).with_max_redirects(10);
        let err = downloader.download(&start(), |_| Ok(0)).unwrap_err();

        assert!(matches!(err, InstallerError::TooManyRedirects { max: 10, .. }));
        assert_eq!(downloader.transport().requests, 11);
    }

    #[test]
    fn test_zero_redirects_allowed() {
        let mut downloader = Downloader::new(Scripted::new(&[(302, Some("/x"), b"")]))
            .with_max_redirects(0);
        let err = downloader.download(&start(), |_| Ok(0)).unwrap_err();
        assert!(matches!(err, InstallerError::TooManyRedirects { max: 0, .. }));
    }

    #[test]
    fn test_missing_location() {
        let mut downloader = Downloader::new(Scripted::new(&[(301, None, b"")]));
        let err = downloader.download(&start(), |_| Ok(0)).unwrap_err();
        assert!(matches!(err, InstallerError::MissingLocation { status: 301, .. }));
    }

    #[test]
    fn test_consumer_error_propagates() {
        let mut downloader = Downloader::new(Scripted::new(&[(200, None, b"data")]));
        let err = downloader
            .download(&start(), |_| {
                Err(InstallerError::Stream {
                    source: io::Error::new(io::ErrorKind::Other, "disk on fire"),
                })
            })
            .unwrap_err();
        assert!(matches!(err, InstallerError::Stream { .. }));
    }

    #[test]
    fn test_boxed_transport() {
        let transport: Box<dyn Transport> = Box::new(Scripted::new(&[(200, None, b"ok")]));
        let mut downloader = Downloader::new(transport);
        let mut received = Vec::new();
        downloader.download(&start(), collect(&mut received)).unwrap();
        assert_eq!(received, b"ok");
    }
}
