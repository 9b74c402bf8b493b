use std::env;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use actix_cors::Cors;
use actix_web::{get, middleware, put, web, App, HttpResponse, HttpServer, Responder};
use log::{info, warn};

use serde::Deserialize;
use wordgen_core::config::{CorpusSource, DEFAULT_ORDER, ModelConfig};
use wordgen_core::dictionary::{DEFAULT_DICTIONARY_ROOT, Language, WordType, available_dictionaries};
use wordgen_core::model::generator::MarkovWordGenerator;

/// Sampling steps allowed for one generated word when the query sets none.
const DEFAULT_MAX_STEPS: usize = 100;

/// Struct representing query parameters for the `/v1/generate` endpoint
#[derive(Deserialize)]
struct GenerateParams {
	seed: Option<String>,
	nb_try: Option<usize>,
	max_steps: Option<usize>
}

#[derive(Deserialize)]
struct ExistsParams {
	word: Option<String>
}

/// Struct representing query parameters for the `/v1/load_model` endpoint
#[derive(Deserialize)]
struct LoadParams {
	language: Option<String>,
	word_type: Option<String>,
	order: Option<usize>,
	fold_accents: Option<bool>
}

struct SharedData {
	dictionary_root: PathBuf,
	model: Option<MarkovWordGenerator>
}

impl LoadParams {
	/// Builds the model configuration, rejecting unknown or missing names.
	fn model_config(&self, dictionary_root: &Path) -> Result<ModelConfig, String> {
		let language: Language = match &self.language {
			Some(s) => s.parse().map_err(|e| format!("{e}"))?,
			None => return Err("Missing language".into()),
		};
		let word_type: WordType = match &self.word_type {
			Some(s) => s.parse().map_err(|e| format!("{e}"))?,
			None => return Err("Missing word_type".into()),
		};

		let source = CorpusSource::Dictionary { language, word_type, root: dictionary_root.to_path_buf() };
		let config = ModelConfig::new(self.order.unwrap_or(DEFAULT_ORDER), source)
			.with_fold_accents(self.fold_accents.unwrap_or(false));
		config.validate().map_err(|e| format!("{e}"))?;
		Ok(config)
	}
}

/// HTTP GET endpoint `/v1/generate`
///
/// Generates a word from the loaded model, starting with `seed` if given.
/// Retries up to `nb_try` times to avoid words of the training list, and
/// gives up after `max_steps` sampling steps.
#[get("/v1/generate")]
async fn get_generated(data: web::Data<RwLock<SharedData>>, query: web::Query<GenerateParams>) -> impl Responder {
	let seed = query.seed.as_deref().unwrap_or("");
	let nb_try = query.nb_try.unwrap_or(5);
	let max_steps = query.max_steps.unwrap_or(DEFAULT_MAX_STEPS);

	let shared_data = match data.read() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	let model = match &shared_data.model {
		Some(model) => model,
		None => return HttpResponse::BadRequest().body("No model loaded"),
	};

	match model.generate_new_word_capped(&mut rand::rng(), seed, nb_try, max_steps) {
		Ok(result) => HttpResponse::Ok().body(result),
		Err(e) => {
			warn!("generation failed: {e}");
			HttpResponse::InternalServerError().body(e.to_string())
		}
	}
}

/// HTTP GET endpoint `/v1/exists`
///
/// Returns `true` if the word is in the training list of the loaded model.
#[get("/v1/exists")]
async fn get_exists(data: web::Data<RwLock<SharedData>>, query: web::Query<ExistsParams>) -> impl Responder {
	let word = match &query.word {
		Some(w) if !w.trim().is_empty() => w,
		_ => return HttpResponse::BadRequest().body("Missing or empty word"),
	};

	let shared_data = match data.read() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	match &shared_data.model {
		Some(model) => HttpResponse::Ok().body(model.word_exists(word).to_string()),
		None => HttpResponse::BadRequest().body("No model loaded"),
	}
}

#[get("/v1/dictionaries")]
async fn get_dictionaries() -> impl Responder {
	let names: Vec<String> = available_dictionaries()
		.iter()
		.map(|(language, word_type)| format!("{language}/{word_type}"))
		.collect();
	HttpResponse::Ok().body(names.join("\n"))
}

#[put("/v1/load_model")]
async fn put_model(data: web::Data<RwLock<SharedData>>, query: web::Query<LoadParams>) -> impl Responder {
	let dictionary_root = match data.read() {
		Ok(m) => m.dictionary_root.clone(),
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	let config = match query.model_config(&dictionary_root) {
		Ok(config) => config,
		Err(e) => return HttpResponse::BadRequest().body(e),
	};

	// Built outside the lock, generation keeps running on the previous model
	let model = match MarkovWordGenerator::new(&config) {
		Ok(m) => m,
		Err(e) => return HttpResponse::InternalServerError().body(format!("Failed to load model: {e}"))
	};

	let mut shared_data = match data.write() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	shared_data.model = Some(model);

	HttpResponse::Ok().body("Model loaded successfully")
}

/// Main entry point for the server.
///
/// Wraps the model in a `RwLock` (generation only reads it) and starts an
/// Actix-web HTTP server.
///
/// # Environment
/// - `WORDGEN_BIND`: address to bind (default `127.0.0.1:5000`)
/// - `WORDGEN_DICTIONARIES`: dictionary folder (default `./dictionaries`)
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

	let bind = env::var("WORDGEN_BIND").unwrap_or_else(|_| "127.0.0.1:5000".to_owned());
	let dictionary_root = env::var("WORDGEN_DICTIONARIES").unwrap_or_else(|_| DEFAULT_DICTIONARY_ROOT.to_owned());

	let shared_data = SharedData {
		dictionary_root: PathBuf::from(dictionary_root),
		model: None,
	};
	let shared_model = web::Data::new(RwLock::new(shared_data));

	info!("listening on {bind}");
	HttpServer::new(move || {
		App::new()
			.wrap(middleware::Logger::default())
			.wrap(Cors::permissive())
			.app_data(shared_model.clone())
			.service(get_generated)
			.service(get_exists)
			.service(get_dictionaries)
			.service(put_model)
	})
		.bind(bind)?
		.run()
		.await
}

#[cfg(test)]
mod tests {
	use super::*;
	use actix_web::test;
	use wordgen_core::model::normalizer::Normalizer;

	fn shared(model: Option<MarkovWordGenerator>) -> web::Data<RwLock<SharedData>> {
		let dictionary_root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("..").join("dictionaries");
		web::Data::new(RwLock::new(SharedData { dictionary_root, model }))
	}

	fn cat_car_can() -> MarkovWordGenerator {
		MarkovWordGenerator::from_lines(&["cat", "car", "can"], 1, Normalizer::new(false)).unwrap()
	}

	async fn body_text(response: actix_web::dev::ServiceResponse) -> String {
		let bytes = test::read_body(response).await;
		String::from_utf8(bytes.to_vec()).unwrap()
	}

	#[actix_web::test]
	async fn generate_without_model_is_rejected() {
		let app = test::init_service(App::new().app_data(shared(None)).service(get_generated)).await;
		let request = test::TestRequest::get().uri("/v1/generate").to_request();
		let response = test::call_service(&app, request).await;
		assert_eq!(response.status(), 400);
	}

	#[actix_web::test]
	async fn generate_with_seed() {
		let app = test::init_service(App::new().app_data(shared(Some(cat_car_can()))).service(get_generated)).await;
		let request = test::TestRequest::get().uri("/v1/generate?seed=ca&nb_try=0").to_request();
		let response = test::call_service(&app, request).await;
		assert!(response.status().is_success());
		let word = body_text(response).await;
		assert!(["cat", "car", "can"].contains(&word.as_str()), "got {word}");
	}

	#[actix_web::test]
	async fn generate_reports_step_limit() {
		let looping = MarkovWordGenerator::from_lines(&["aaaaaaaaaaaaaaaaaaaa"], 1, Normalizer::new(false)).unwrap();
		let app = test::init_service(App::new().app_data(shared(Some(looping))).service(get_generated)).await;
		let request = test::TestRequest::get().uri("/v1/generate?max_steps=1&nb_try=3").to_request();
		let response = test::call_service(&app, request).await;
		assert_eq!(response.status(), 500);
	}

	#[actix_web::test]
	async fn exists_endpoint() {
		let app = test::init_service(App::new().app_data(shared(Some(cat_car_can()))).service(get_exists)).await;

		let request = test::TestRequest::get().uri("/v1/exists?word=CAT").to_request();
		assert_eq!(body_text(test::call_service(&app, request).await).await, "true");

		let request = test::TestRequest::get().uri("/v1/exists?word=dog").to_request();
		assert_eq!(body_text(test::call_service(&app, request).await).await, "false");

		let request = test::TestRequest::get().uri("/v1/exists").to_request();
		assert_eq!(test::call_service(&app, request).await.status(), 400);
	}

	#[actix_web::test]
	async fn load_model_validates_and_loads() {
		let data = shared(None);
		let app = test::init_service(
			App::new().app_data(data.clone()).service(put_model).service(get_generated),
		)
		.await;

		let request = test::TestRequest::put()
			.uri("/v1/load_model?language=en&word_type=city")
			.to_request();
		assert_eq!(test::call_service(&app, request).await.status(), 400);

		let request = test::TestRequest::put()
			.uri("/v1/load_model?language=fr&word_type=city&order=2&fold_accents=true")
			.to_request();
		assert!(test::call_service(&app, request).await.status().is_success());
		assert_eq!(data.read().unwrap().model.as_ref().map(|m| m.order()), Some(2));

		let request = test::TestRequest::get().uri("/v1/generate?max_steps=1000").to_request();
		assert!(test::call_service(&app, request).await.status().is_success());
	}

	#[actix_web::test]
	async fn lists_dictionaries() {
		let app = test::init_service(App::new().service(get_dictionaries)).await;
		let request = test::TestRequest::get().uri("/v1/dictionaries").to_request();
		let text = body_text(test::call_service(&app, request).await).await;
		assert!(text.lines().any(|line| line == "fr/city"));
		assert!(!text.lines().any(|line| line == "en/city"));
	}
}
