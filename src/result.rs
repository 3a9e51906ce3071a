use crate::constants::header;
use crate::headers::{Headers, merge_vary};

/// Headers and status for a preflight response. The body is always empty.
///
/// A rejected preflight carries only the status; the missing
/// `Access-Control-Allow-Origin` header is the rejection signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreflightResult {
    pub headers: Headers,
    pub status: u16,
}

/// Headers to add to the response of an accepted simple request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleResult {
    pub headers: Headers,
}

/// Overall decision returned by the evaluator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsDecision {
    /// No `Origin` header: not a cross-origin request.
    NotApplicable,
    Preflight(PreflightResult),
    Simple(SimpleResult),
    /// Simple request from an origin the policy does not allow. No CORS headers are
    /// added and the request still reaches the next handler.
    OriginRejected,
}

impl CorsDecision {
    pub fn flow(&self) -> Flow {
        match self {
            CorsDecision::Preflight(_) => Flow::Halt,
            _ => Flow::Continue,
        }
    }

    /// Writes the decision to a host response.
    ///
    /// Preflight responses get their status and a fixed `Vary`; simple responses have
    /// `Origin` appended to any `Vary` value already present.
    pub fn write_to<R>(&self, response: &mut R) -> Flow
    where
        R: CorsResponse + ?Sized,
    {
        match self {
            CorsDecision::Preflight(result) => {
                response.set_status(result.status);
                for (name, value) in &result.headers {
                    response.set_header(name, value.clone());
                }
            }
            CorsDecision::Simple(result) => {
                for (name, value) in &result.headers {
                    if name.eq_ignore_ascii_case(header::VARY) {
                        let merged = merge_vary(response.header(header::VARY), value);
                        response.set_header(header::VARY, merged);
                    } else {
                        response.set_header(name, value.clone());
                    }
                }
            }
            CorsDecision::NotApplicable | CorsDecision::OriginRejected => {}
        }
        self.flow()
    }
}

/// Whether the host pipeline should invoke the next handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Halt,
}

/// Host response seam written by [`crate::RequestEvaluator::apply`].
pub trait CorsResponse {
    fn header(&self, name: &str) -> Option<&str>;
    fn set_header(&mut self, name: &str, value: String);
    fn set_status(&mut self, status: u16);
}

/// Header-only hosts: names compare case-insensitively and the status is ignored.
impl CorsResponse for Headers {
    fn header(&self, name: &str) -> Option<&str> {
        self.iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    fn set_header(&mut self, name: &str, value: String) {
        match self
            .keys()
            .position(|key| key.eq_ignore_ascii_case(name))
        {
            Some(index) => {
                if let Some((_, slot)) = self.get_index_mut(index) {
                    *slot = value;
                }
            }
            None => {
                self.insert(name.to_owned(), value);
            }
        }
    }

    fn set_status(&mut self, _status: u16) {}
}

#[cfg(test)]
#[path = "result_test.rs"]
mod result_test;
