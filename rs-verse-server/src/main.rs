use std::path::PathBuf;
use std::sync::RwLock;

use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{get, put, web, App, HttpResponse, HttpServer, Responder};

use clap::Parser;
use log::{error, info, warn};
use serde::Deserialize;
use rs_verse_core::io::list_files;
use rs_verse_core::{ChainError, GenerationInput, Generator};

/// HTTP front-end for the rs-verse generator.
#[derive(Parser)]
#[command(name = "rs-verse-server", version, about = "Serves generated poems over HTTP")]
struct Args {
	/// Directory holding the `.txt` corpora.
	#[arg(short, long, default_value = "./data")]
	data: String,

	/// Address to bind.
	#[arg(long, default_value = "127.0.0.1")]
	host: String,

	/// Port to bind.
	#[arg(short, long, default_value_t = 5000)]
	port: u16,

	/// Comma-separated corpus names to load at startup.
	#[arg(short, long)]
	corpus: Option<String>,
}

/// Struct representing query parameters for the `/v1/generate` endpoint
#[derive(Deserialize)]
struct GenerateParams {
	length: Option<usize>,
	start: Option<String>,
	seed: Option<u64>
}

#[derive(Deserialize)]
struct CorpusQuery {
	names: Option<String>
}

#[derive(Deserialize)]
struct SuccessorQuery {
	token: String
}

struct SharedData {
	data_dir: PathBuf,
	generator: Option<Generator>
}

impl GenerateParams {
	/// Builds the generation input, falling back to defaults for missing fields.
	fn generation_input(&self) -> Result<GenerationInput, ChainError> {
		let mut input = GenerationInput::default();
		if let Some(length) = self.length {
			input.set_length(length)?;
		}
		if let Some(start) = &self.start {
			input.set_start_token(start)?;
		}
		input.seed = self.seed;
		Ok(input)
	}
}

impl SharedData {
	/// Builds a generator from `names`, resolved as `<data_dir>/<name>.txt`.
	fn load(&mut self, names: &[&str]) -> Result<(), ChainError> {
		let paths: Vec<PathBuf> = names
			.iter()
			.map(|name| self.data_dir.join(format!("{name}.txt")))
			.collect();
		let generator = Generator::from_files(&paths)?;
		info!("Model rebuilt from {:?}: {} predecessors", names, generator.model().len());
		self.generator = Some(generator);
		Ok(())
	}
}

/// Splits a comma-separated list of names, dropping blanks.
fn split_names(names: &str) -> Vec<&str> {
	names
		.split(',')
		.map(|s| s.trim())
		.filter(|s| !s.is_empty())
		.collect()
}

/// Maps a core error to the matching HTTP response.
fn error_response(e: ChainError) -> HttpResponse {
	match e {
		ChainError::Io(ref io) if io.kind() == std::io::ErrorKind::NotFound => {
			HttpResponse::NotFound().body(e.to_string())
		}
		ChainError::Io(_) => {
			error!("{e}");
			HttpResponse::InternalServerError().body(e.to_string())
		}
		_ => HttpResponse::BadRequest().body(e.to_string()),
	}
}

/// HTTP GET endpoint `/v1/generate`
///
/// Generates a text from the loaded model based on query parameters.
/// Returns the generated text as the response body.
#[get("/v1/generate")]
async fn get_generated(data: web::Data<RwLock<SharedData>>, query: web::Query<GenerateParams>) -> impl Responder {
	let input = match query.generation_input() {
		Ok(input) => input,
		Err(e) => return error_response(e)
	};

	let shared_data = match data.read() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	let generator = match &shared_data.generator {
		Some(generator) => generator,
		None => return HttpResponse::Conflict().body("No corpus loaded"),
	};

	match generator.generate(&input) {
		Ok(result) => HttpResponse::Ok().body(result),
		Err(e) => {
			warn!("Generation from '{}' failed: {e}", input.start_token());
			error_response(e)
		}
	}
}

#[get("/v1/corpora")]
async fn get_corpora(data: web::Data<RwLock<SharedData>>) -> impl Responder {
	let shared_data = match data.read() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	match list_files(&shared_data.data_dir, "txt") {
		Ok(files) => HttpResponse::Ok().body(files.join("\n").replace(".txt", "")),
		Err(_) => HttpResponse::InternalServerError().body("Failed to list corpora")
	}
}

#[get("/v1/loaded_corpora")]
async fn get_loaded_corpora(data: web::Data<RwLock<SharedData>>) -> impl Responder {
	let shared_data = match data.read() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	let names = match &shared_data.generator {
		Some(generator) => generator.get_corpus_names().join("\n"),
		None => String::new(),
	};
	HttpResponse::Ok().body(names)
}

#[get("/v1/successors")]
async fn get_successors(data: web::Data<RwLock<SharedData>>, query: web::Query<SuccessorQuery>) -> impl Responder {
	let shared_data = match data.read() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	let generator = match &shared_data.generator {
		Some(generator) => generator,
		None => return HttpResponse::Conflict().body("No corpus loaded"),
	};
	match generator.model().successors(&query.token) {
		Ok(distribution) => HttpResponse::Ok().json(distribution),
		Err(e) => HttpResponse::NotFound().body(e.to_string()),
	}
}

#[put("/v1/load_corpora")]
async fn put_corpora(data: web::Data<RwLock<SharedData>>, query: web::Query<CorpusQuery>) -> impl Responder {
	let query_names = match &query.names {
		Some(s) if !s.trim().is_empty() => s.trim(),
		_ => return HttpResponse::BadRequest().body("Missing or empty corpus name"),
	};
	let names = split_names(query_names);

	let mut shared_data = match data.write() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	match shared_data.load(&names) {
		Ok(_) => HttpResponse::Ok().body("Corpora loaded successfully"),
		Err(e) => {
			warn!("Failed to load corpora {:?}: {e}", names);
			error_response(e)
		}
	}
}

/// Main entry point for the server.
///
/// Optionally preloads corpora, wraps the generator in a `RwLock` so that
/// generations only take read locks, and starts an Actix-web HTTP server.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::init();
	let args = Args::parse();

	let mut shared_data = SharedData {
		data_dir: rs_verse_core::io::normalize_folder(&args.data),
		generator: None,
	};
	if let Some(corpus) = &args.corpus {
		if let Err(e) = shared_data.load(&split_names(corpus)) {
			return Err(std::io::Error::other(e));
		}
	}
	let shared_model = web::Data::new(RwLock::new(shared_data));

	info!("Listening on {}:{}", args.host, args.port);
	HttpServer::new(move || {
		App::new()
			.wrap(Logger::default())
			.wrap(Cors::permissive())
			.app_data(shared_model.clone())
			.service(get_generated)
			.service(get_corpora)
			.service(get_loaded_corpora)
			.service(get_successors)
			.service(put_corpora)
	})
		.bind((args.host.as_str(), args.port))?
		.run()
		.await
}

#[cfg(test)]
mod tests {
	use super::*;
	use actix_web::{http::StatusCode, test};

	fn data_dir(name: &str) -> PathBuf {
		let dir = std::env::temp_dir().join(format!("rs-verse-server-{}-{}", name, std::process::id()));
		let _ = std::fs::remove_dir_all(&dir);
		std::fs::create_dir_all(&dir).unwrap();
		std::fs::write(dir.join("spleen.txt"), "je vois la mer. je vois la nuit.").unwrap();
		std::fs::write(dir.join("albatros.txt"), "souvent, pour s'amuser").unwrap();
		dir
	}

	fn state(dir: PathBuf, loaded: bool) -> web::Data<RwLock<SharedData>> {
		let mut shared_data = SharedData { data_dir: dir, generator: None };
		if loaded {
			shared_data.load(&["spleen"]).unwrap();
		}
		web::Data::new(RwLock::new(shared_data))
	}

	macro_rules! app {
		($state:expr) => {
			test::init_service(
				App::new()
					.app_data($state.clone())
					.service(get_generated)
					.service(get_corpora)
					.service(get_loaded_corpora)
					.service(get_successors)
					.service(put_corpora),
			)
			.await
		};
	}

	#[actix_web::test]
	async fn generate_returns_text_with_requested_start() {
		let state = state(data_dir("generate"), true);
		let app = app!(state);

		let req = test::TestRequest::get().uri("/v1/generate?length=3&start=Je&seed=4").to_request();
		let body = test::call_and_read_body(&app, req).await;
		assert_eq!(body, "Je vois la");
	}

	#[actix_web::test]
	async fn generate_rejects_zero_length() {
		let state = state(data_dir("zero"), true);
		let app = app!(state);

		let req = test::TestRequest::get().uri("/v1/generate?length=0").to_request();
		let resp = test::call_service(&app, req).await;
		assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
	}

	#[actix_web::test]
	async fn generate_reports_unknown_start_token() {
		let state = state(data_dir("unknown"), true);
		let app = app!(state);

		let req = test::TestRequest::get().uri("/v1/generate?length=5&start=Tu").to_request();
		let resp = test::call_service(&app, req).await;
		assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
	}

	#[actix_web::test]
	async fn generate_without_corpus_is_a_conflict() {
		let state = state(data_dir("empty"), false);
		let app = app!(state);

		let req = test::TestRequest::get().uri("/v1/generate").to_request();
		let resp = test::call_service(&app, req).await;
		assert_eq!(resp.status(), StatusCode::CONFLICT);
	}

	#[actix_web::test]
	async fn successors_are_served_as_json() {
		let state = state(data_dir("successors"), true);
		let app = app!(state);

		let req = test::TestRequest::get().uri("/v1/successors?token=La").to_request();
		let body = test::call_and_read_body(&app, req).await;
		assert_eq!(body, r#"{"mer":1,"nuit":1}"#);

		let req = test::TestRequest::get().uri("/v1/successors?token=absent").to_request();
		let resp = test::call_service(&app, req).await;
		assert_eq!(resp.status(), StatusCode::NOT_FOUND);
	}

	#[actix_web::test]
	async fn corpora_can_be_listed_and_reloaded() {
		let state = state(data_dir("reload"), true);
		let app = app!(state);

		let req = test::TestRequest::get().uri("/v1/corpora").to_request();
		assert_eq!(test::call_and_read_body(&app, req).await, "albatros\nspleen");

		let req = test::TestRequest::put().uri("/v1/load_corpora?names=spleen,%20albatros").to_request();
		let resp = test::call_service(&app, req).await;
		assert_eq!(resp.status(), StatusCode::OK);

		let req = test::TestRequest::get().uri("/v1/loaded_corpora").to_request();
		assert_eq!(test::call_and_read_body(&app, req).await, "spleen\nalbatros");

		let req = test::TestRequest::put().uri("/v1/load_corpora?names=").to_request();
		let resp = test::call_service(&app, req).await;
		assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
	}

	#[actix_web::test]
	async fn unknown_corpus_name_is_not_found() {
		let state = state(data_dir("absent"), true);
		let app = app!(state);

		let req = test::TestRequest::put().uri("/v1/load_corpora?names=absent").to_request();
		let resp = test::call_service(&app, req).await;
		assert_eq!(resp.status(), StatusCode::NOT_FOUND);

		let req = test::TestRequest::get().uri("/v1/loaded_corpora").to_request();
		assert_eq!(test::call_and_read_body(&app, req).await, "spleen");
	}

	#[actix_web::test]
	async fn io_errors_map_to_status_codes() {
		let missing = ChainError::Io(std::io::Error::from(std::io::ErrorKind::NotFound));
		assert_eq!(error_response(missing).status(), StatusCode::NOT_FOUND);

		let denied = ChainError::Io(std::io::Error::from(std::io::ErrorKind::PermissionDenied));
		assert_eq!(error_response(denied).status(), StatusCode::INTERNAL_SERVER_ERROR);

		let unknown = ChainError::UnknownPredecessor { token: "tu".to_owned() };
		assert_eq!(error_response(unknown).status(), StatusCode::BAD_REQUEST);
	}
}
