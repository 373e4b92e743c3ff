use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer, Result as ActixResult};
use addrmatch_core::RawAddress;
use addrmatch_similarity::{AddressPair, PairScorer, ScoreResult};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error};

#[derive(Deserialize)]
struct ScoreRequest {
    pairs: Vec<AddressPair>,
}

#[derive(Serialize)]
struct ScoreResponse {
    results: Vec<ScoreResult>,
}

#[derive(Deserialize)]
struct ExplainRequest {
    address1: RawAddress,
    address2: RawAddress,
}

pub struct RestApi;

impl RestApi {
    pub async fn start(scorer: Arc<PairScorer>, host: &str, port: u16) -> std::io::Result<()> {
        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            App::new()
                .wrap(cors)
                .configure(Self::configure(scorer.clone()))
        })
        .bind((host, port))?
        .run()
        .await
    }

    /// Register the scoring routes; shared by the server and tests
    pub fn configure(scorer: Arc<PairScorer>) -> impl FnOnce(&mut web::ServiceConfig) {
        move |cfg: &mut web::ServiceConfig| {
            cfg.app_data(web::Data::new(scorer))
                .route("/score", web::post().to(score_pairs))
                .route("/match", web::post().to(score_pairs))
                .route("/explain", web::post().to(explain_pair));
        }
    }
}

async fn score_pairs(
    scorer: web::Data<Arc<PairScorer>>,
    req: web::Json<ScoreRequest>,
) -> ActixResult<HttpResponse> {
    let req = req.into_inner();
    debug!("Scoring {} address pairs", req.pairs.len());

    match scorer.score_pairs(&req.pairs) {
        Ok(results) => Ok(HttpResponse::Ok().json(ScoreResponse { results })),
        Err(e) => {
            error!("Scoring failed: {}", e);
            Ok(HttpResponse::InternalServerError().json(serde_json::json!({
                "error": e.to_string()
            })))
        }
    }
}

async fn explain_pair(
    scorer: web::Data<Arc<PairScorer>>,
    req: web::Json<ExplainRequest>,
) -> ActixResult<HttpResponse> {
    match scorer.explain(&req.address1, &req.address2) {
        Ok(breakdown) => Ok(HttpResponse::Ok().json(breakdown)),
        Err(e) => {
            error!("Explain failed: {}", e);
            Ok(HttpResponse::InternalServerError().json(serde_json::json!({
                "error": e.to_string()
            })))
        }
    }
}
