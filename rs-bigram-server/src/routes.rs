use actix_web::{get, post, web, HttpResponse, Responder};
use log::warn;
use serde::{Deserialize, Serialize};

use rs_bigram_core::TextService;

use crate::error::ApiError;

/// Upper bound on the number of words returned by `/generate`.
///
/// A cyclic corpus never ends a walk early, so larger lengths are clamped.
pub const MAX_GENERATION_LENGTH: usize = 1000;

/// Body of the `/generate` endpoint
#[derive(Deserialize)]
struct TextGenerationRequest {
	start_word: String,
	length: i64,
}

#[derive(Serialize)]
struct TextGenerationResponse {
	generated_text: String,
}

/// Body of the `/similarity` endpoint
#[derive(Deserialize)]
struct SimilarityRequest {
	text1: String,
	text2: String,
}

#[derive(Serialize)]
struct SimilarityResponse {
	text1: String,
	text2: String,
	similarity_score: f32,
}

/// Body of the `/embedding` endpoint
#[derive(Deserialize)]
struct EmbeddingRequest {
	word: String,
}

#[derive(Serialize)]
struct EmbeddingResponse {
	word: String,
	vector: Vec<f32>,
}

#[derive(Serialize)]
struct RootResponse {
	#[serde(rename = "Hello")]
	hello: &'static str,
}

#[get("/")]
async fn read_root() -> impl Responder {
	HttpResponse::Ok().json(RootResponse { hello: "World" })
}

/// HTTP POST endpoint `/generate`
///
/// Walks the bigram table from `start_word`.
/// A zero or negative `length` returns the start word alone; lengths above
/// `MAX_GENERATION_LENGTH` are clamped to it.
#[post("/generate")]
async fn generate_text(data: web::Data<TextService>, request: web::Json<TextGenerationRequest>) -> impl Responder {
	let length = usize::try_from(request.length).unwrap_or(0).min(MAX_GENERATION_LENGTH);
	let generated_text = data.generate_text(&request.start_word, length);
	HttpResponse::Ok().json(TextGenerationResponse { generated_text })
}

/// HTTP POST endpoint `/similarity`
///
/// The delegate may block (model inference, remote call), so it runs on the
/// blocking pool. Its score is returned as is.
#[post("/similarity")]
async fn get_similarity(data: web::Data<TextService>, request: web::Json<SimilarityRequest>) -> Result<HttpResponse, ApiError> {
	let SimilarityRequest { text1, text2 } = request.into_inner();

	let service = data.clone();
	let (left, right) = (text1.clone(), text2.clone());
	let similarity_score = web::block(move || service.similarity(&left, &right))
		.await?
		.inspect_err(|e| warn!("Similarity failed: {e}"))?;

	Ok(HttpResponse::Ok().json(SimilarityResponse { text1, text2, similarity_score }))
}

/// HTTP POST endpoint `/embedding`
#[post("/embedding")]
async fn get_embedding(data: web::Data<TextService>, request: web::Json<EmbeddingRequest>) -> Result<HttpResponse, ApiError> {
	let EmbeddingRequest { word } = request.into_inner();

	let service = data.clone();
	let input = word.clone();
	let vector = web::block(move || service.embed(&input))
		.await?
		.inspect_err(|e| warn!("Embedding failed: {e}"))?;

	Ok(HttpResponse::Ok().json(EmbeddingResponse { word, vector }))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
	cfg.service(read_root)
		.service(generate_text)
		.service(get_similarity)
		.service(get_embedding);
}
