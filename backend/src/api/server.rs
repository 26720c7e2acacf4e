//! HTTP server for the matrix operations.
//!
//! Every operation endpoint takes a multipart form with the CSV in field
//! `file` and answers `200 text/plain`. Failures are reported in the body as
//! `error <message>`.
//!
//! # API Endpoints
//!
//! | Method | Path        | Description                          |
//! |--------|-------------|--------------------------------------|
//! | GET    | `/health`   | Health check                         |
//! | POST   | `/echo`     | Grid back as CSV lines               |
//! | POST   | `/invert`   | Transposed grid as CSV lines         |
//! | POST   | `/flatten`  | All cells on one line                |
//! | POST   | `/sum`      | Sum of all cells                     |
//! | POST   | `/multiply` | Product of all cells                 |
//! | GET    | `/api/logs` | SSE stream for real-time logs        |

use axum::{
    extract::{multipart::MultipartRejection, DefaultBodyLimit, Multipart, State},
    http::{header, Method},
    response::{sse::Event, Json, Sse},
    routing::{get, post},
    Router,
};
use futures::stream::Stream;
use std::{convert::Infallible, time::Duration};
use tokio::net::TcpListener;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt as _;
use tower_http::cors::CorsLayer;
use uuid::Uuid;

use super::logs::{log_info, LogEntry, LOG_BROADCASTER};
use super::types::{error_body, HealthResponse};
use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::matrix::Operation;
use crate::parser::{parse_bytes, CsvOptions};

/// Shared handler state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub csv: CsvOptions,
}

/// Build the application router.
pub fn router(config: &ServerConfig) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([header::CONTENT_TYPE]);

    let mut app: Router<AppState> = Router::new()
        .route("/", get(health))
        .route("/health", get(health))
        .route("/api/logs", get(sse_logs));

    for op in Operation::ALL {
        app = app.route(
            &format!("/{}", op),
            post(move |State(state): State<AppState>, upload: Result<Multipart, MultipartRejection>| {
                run_operation(op, state, upload)
            }),
        );
    }

    app.layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(cors)
        .with_state(AppState {
            csv: config.csv_options(),
        })
}

/// Serve `app` on an already bound listener until the process stops.
pub async fn serve(listener: TcpListener, app: Router) -> ServerResult<()> {
    axum::serve(listener, app).await?;
    Ok(())
}

/// Bind the configured address and start the HTTP server
pub async fn start_server(config: ServerConfig) -> ServerResult<()> {
    let listener = TcpListener::bind(config.addr()).await?;

    println!("🚀 Matrixops server running on http://{}", config.addr());
    for op in Operation::ALL {
        println!("   POST /{:<9} - upload CSV as field 'file'", op.as_str());
    }
    println!("   GET  /api/logs  - SSE log stream");
    println!("   GET  /health    - Health check");
    println!();
    announce(&config);

    serve(listener, router(&config)).await
}

/// Health check endpoint
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

/// SSE endpoint for real-time log streaming
async fn sse_logs() -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = LOG_BROADCASTER.subscribe();

    let stream = BroadcastStream::new(rx).filter_map(|result| match result {
        Ok(entry) => {
            let json = serde_json::to_string(&entry).ok()?;
            Some(Ok(Event::default().data(json)))
        }
        Err(_) => None,
    });

    Sse::new(stream).keep_alive(
        axum::response::sse::KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}

/// Pull the `file` field out of a multipart form.
async fn read_upload(mut multipart: Multipart) -> ServerResult<Vec<u8>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ServerError::Multipart(e.body_text()))?
    {
        if field.name() == Some("file") {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ServerError::Multipart(e.body_text()))?;
            return Ok(bytes.to_vec());
        }
    }

    Err(ServerError::MissingFile)
}

/// Decode the upload and run one operation over it.
async fn run_operation(
    op: Operation,
    state: AppState,
    upload: Result<Multipart, MultipartRejection>,
) -> String {
    let request_id = Uuid::new_v4().to_string();
    let log = |entry: LogEntry| LOG_BROADCASTER.log(entry.with_request(request_id.as_str()));

    let multipart = match upload {
        Ok(multipart) => multipart,
        Err(rejection) => {
            let body = error_body(rejection.body_text());
            log(LogEntry::error(format!("{}: {}", op, body)));
            return body;
        }
    };

    let bytes = match read_upload(multipart).await {
        Ok(bytes) => bytes,
        Err(e) => {
            log(LogEntry::error(format!("{}: {}", op, e)));
            return error_body(e);
        }
    };
    log(LogEntry::info(format!("{}: received {} bytes", op, bytes.len())));

    let grid = match parse_bytes(&bytes, &state.csv) {
        Ok(grid) => grid,
        Err(e) => {
            log(LogEntry::error(format!("{}: {}", op, e)));
            return error_body(e);
        }
    };

    match op.apply(&grid) {
        Ok(body) => {
            log(LogEntry::success(format!(
                "{}: {}x{} grid",
                op,
                grid.len(),
                grid.first().map_or(0, Vec::len)
            )));
            body
        }
        Err(e) => {
            log(LogEntry::warning(format!("{}: {}", op, e)));
            error_body(e)
        }
    }
}

/// Log server startup through the broadcaster.
fn announce(config: &ServerConfig) {
    log_info(format!(
        "listening on {} (max upload {} bytes, flexible csv: {})",
        config.addr(),
        config.max_upload_bytes,
        config.flexible_csv
    ));
}
