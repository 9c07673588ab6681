use std::time::Duration;

use log::debug;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::error::DelegateError;
use crate::similarity::SimilarityDelegate;

#[derive(Serialize)]
struct EmbedRequest<'a> {
	text: &'a str,
}

#[derive(Deserialize)]
struct EmbedResponse {
	vector: Vec<f32>,
}

#[derive(Serialize)]
struct SimilarityRequest<'a> {
	text1: &'a str,
	text2: &'a str,
}

#[derive(Deserialize)]
struct SimilarityResponse {
	similarity: f32,
}

/// Client for an external NLP service (for example a spaCy sidecar).
///
/// # Protocol
/// - `POST {base_url}/embed` with `{"text": ...}` → `{"vector": [...]}`
/// - `POST {base_url}/similarity` with `{"text1": ..., "text2": ...}` → `{"similarity": ...}`
///
/// # Errors
/// - Transport failures (connection, timeout) → `DelegateError::Unavailable`
/// - Non-success status or undecodable body → `DelegateError::Processing`
///
/// # Notes
/// - Blocking: call it from a thread where blocking is allowed.
/// - Must not be dropped inside an async runtime.
#[derive(Debug, Clone)]
pub struct RemoteDelegate {
	client: Client,
	base_url: String,
}

impl RemoteDelegate {
	/// Creates a client for the service at `base_url` with a request timeout.
	pub fn new(base_url: &str, timeout: Duration) -> Result<Self, DelegateError> {
		let client = Client::builder()
			.timeout(timeout)
			.build()
			.map_err(|e| DelegateError::Unavailable(e.to_string()))?;
		Ok(Self {
			client,
			base_url: base_url.trim_end_matches('/').to_owned(),
		})
	}

	pub fn base_url(&self) -> &str {
		&self.base_url
	}

	/// Sends a JSON body to `{base_url}/{endpoint}` and decodes the JSON answer.
	fn post<B, T>(&self, endpoint: &str, body: &B) -> Result<T, DelegateError>
	where
		B: Serialize + ?Sized,
		T: for<'de> Deserialize<'de>,
	{
		let url = format!("{}/{}", self.base_url, endpoint);
		debug!("POST {url}");

		let response = self.client
			.post(&url)
			.json(body)
			.send()
			.map_err(|e| DelegateError::Unavailable(e.to_string()))?;

		let status = response.status();
		if !status.is_success() {
			let details = response.text().unwrap_or_default();
			return Err(DelegateError::Processing(format!("{url} answered {status}: {details}")));
		}

		response
			.json::<T>()
			.map_err(|e| DelegateError::Processing(format!("invalid answer from {url}: {e}")))
	}
}

impl SimilarityDelegate for RemoteDelegate {
	fn embed(&self, word: &str) -> Result<Vec<f32>, DelegateError> {
		let response: EmbedResponse = self.post("embed", &EmbedRequest { text: word })?;
		Ok(response.vector)
	}

	fn similarity(&self, text1: &str, text2: &str) -> Result<f32, DelegateError> {
		let response: SimilarityResponse = self.post("similarity", &SimilarityRequest { text1, text2 })?;
		Ok(response.similarity)
	}
}

#[cfg(test)]
mod tests {
	use std::io::{Read, Write};
	use std::net::TcpListener;
	use std::sync::mpsc;
	use std::thread;

	use super::*;

	/// Serves one canned HTTP response on a local port.
	///
	/// Returns the base URL and a receiver yielding the raw request once it
	/// has been read completely.
	fn serve_once(status_line: &'static str, body: &'static str) -> (String, mpsc::Receiver<String>) {
		let listener = TcpListener::bind("127.0.0.1:0").unwrap();
		let addr = listener.local_addr().unwrap();
		let (tx, rx) = mpsc::channel();

		thread::spawn(move || {
			let (mut stream, _) = listener.accept().unwrap();
			let mut request = Vec::new();
			let mut buf = [0u8; 1024];
			loop {
				let n = stream.read(&mut buf).unwrap();
				if n == 0 {
					break;
				}
				request.extend_from_slice(&buf[..n]);
				if let Some(end) = request.windows(4).position(|w| w == b"\r\n\r\n") {
					let headers = String::from_utf8_lossy(&request[..end]).to_lowercase();
					let content_length = headers
						.lines()
						.find_map(|line| line.strip_prefix("content-length:"))
						.and_then(|value| value.trim().parse::<usize>().ok())
						.unwrap_or(0);
					if request.len() >= end + 4 + content_length {
						break;
					}
				}
			}

			let response = format!(
				"{status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
				body.len()
			);
			stream.write_all(response.as_bytes()).unwrap();
			let _ = tx.send(String::from_utf8_lossy(&request).into_owned());
		});

		(format!("http://{addr}"), rx)
	}

	fn delegate_for(base_url: &str) -> RemoteDelegate {
		RemoteDelegate::new(base_url, Duration::from_secs(5)).unwrap()
	}

	#[test]
	fn trailing_slash_is_trimmed() {
		let delegate = RemoteDelegate::new("http://localhost:8000/", Duration::from_secs(1)).unwrap();
		assert_eq!(delegate.base_url(), "http://localhost:8000");
	}

	#[test]
	fn unreachable_service_is_reported_as_unavailable() {
		// Nothing listens on the discard port.
		let delegate = RemoteDelegate::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
		assert!(matches!(delegate.similarity("a", "a"), Err(DelegateError::Unavailable(_))));
		assert!(matches!(delegate.embed("king"), Err(DelegateError::Unavailable(_))));
	}

	#[test]
	fn similarity_score_is_passed_through() {
		let (url, request) = serve_once("HTTP/1.1 200 OK", r#"{"similarity": 0.875}"#);
		let score = delegate_for(&url).similarity("king", "queen").unwrap();
		assert_eq!(score, 0.875);

		let request = request.recv().unwrap();
		assert!(request.starts_with("POST /similarity "));
		assert!(request.contains(r#""text1":"king""#));
		assert!(request.contains(r#""text2":"queen""#));
	}

	#[test]
	fn embedding_vector_is_passed_through() {
		let (url, request) = serve_once("HTTP/1.1 200 OK", r#"{"vector": [0.5, -0.25, 1.0]}"#);
		let vector = delegate_for(&url).embed("king").unwrap();
		assert_eq!(vector, vec![0.5, -0.25, 1.0]);

		let request = request.recv().unwrap();
		assert!(request.starts_with("POST /embed "));
		assert!(request.contains(r#""text":"king""#));
	}

	#[test]
	fn error_status_is_a_processing_error() {
		let (url, _request) = serve_once("HTTP/1.1 500 Internal Server Error", r#"{"detail": "model crashed"}"#);
		match delegate_for(&url).similarity("a", "b") {
			Err(DelegateError::Processing(message)) => {
				assert!(message.contains("500"), "{message}");
				assert!(message.contains("model crashed"), "{message}");
			}
			other => panic!("expected a processing error, got {other:?}"),
		}
	}

	#[test]
	fn undecodable_body_is_a_processing_error() {
		let (url, _request) = serve_once("HTTP/1.1 200 OK", "this is not json");
		assert!(matches!(
			delegate_for(&url).similarity("a", "b"),
			Err(DelegateError::Processing(_))
		));
	}

	#[test]
	fn unexpected_answer_shape_is_a_processing_error() {
		let (url, _request) = serve_once("HTTP/1.1 200 OK", r#"{"similarity": 0.5}"#);
		assert!(matches!(delegate_for(&url).embed("king"), Err(DelegateError::Processing(_))));
	}
}
