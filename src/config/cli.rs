//! Command-line options.

use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::config::schema::ServerConfig;
use crate::config::validation::{self, ConfigError, ModeSwitches};

#[derive(Debug, Clone, Parser)]
#[command(name = "mock-ms", version, about = "Configurable mock microservice", long_about = None)]
pub struct Cli {
    /// The port to listen on
    #[arg(long, default_value = "8080")]
    pub port: String,

    /// File to serve
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// The content type to put into the Content-Type header
    #[arg(long = "contentType", default_value = "text/plain")]
    pub content_type: String,

    /// Verbose output
    #[arg(long, action = ArgAction::SetTrue)]
    pub verbose: bool,

    /// Disable keep-alives
    #[arg(long, action = ArgAction::SetTrue)]
    pub nokeepalive: bool,

    /// Dump the request
    #[arg(long = "dumpReq", action = ArgAction::SetTrue)]
    pub dump_req: bool,

    /// Do not canonicalise the case of header names. Names are sent
    /// lower-case as stored (`X-MyHeader` goes out as `x-myheader`)
    #[arg(long = "keepCase", action = ArgAction::SetTrue)]
    pub keep_case: bool,

    /// Populate the Content-Length header in the reply
    #[arg(long = "contentLength", action = ArgAction::SetTrue)]
    pub content_length: bool,

    /// Return the timestamp rather than the contents of a file
    #[arg(long, action = ArgAction::SetTrue)]
    pub time: bool,

    /// Return a sha256 of the time
    #[arg(long = "SHA", action = ArgAction::SetTrue)]
    pub sha: bool,

    /// Accept a file via POST and save it locally. Expects 'Name' in the form
    #[arg(long = "uploadFile", action = ArgAction::SetTrue)]
    pub upload_file: bool,

    /// Print the RPS every minute (provided there is a request)
    #[arg(long, action = ArgAction::SetTrue)]
    pub rps: bool,

    /// Enable WebSocket support
    #[arg(long, action = ArgAction::SetTrue)]
    pub websocket: bool,

    /// Flood timestamps into the websocket once a message is received
    #[arg(long, action = ArgAction::SetTrue)]
    pub wsflood: bool,

    /// Duration to wait before replying
    #[arg(long, default_value = "0s")]
    pub delay: String,

    /// Headers to add to the reply, separated by commas
    #[arg(long, default_value = "")]
    pub headers: String,

    /// PEM encoded certificate to use for https
    #[arg(long, default_value = "")]
    pub cert: String,

    /// PEM encoded key to use with certificate for https
    #[arg(long, default_value = "")]
    pub key: String,

    /// HTTP code to return. Nothing else returned
    #[arg(long = "HttpCode", default_value_t = 0, allow_negative_numbers = true)]
    pub http_code: i64,

    /// OpenTelemetry collector endpoint
    #[arg(long = "otel-endpoint", default_value = "")]
    pub otel_endpoint: String,

    /// Service name for tracing
    #[arg(long = "service-name", default_value = "mock-ms")]
    pub service_name: String,
}

impl Cli {
    /// Resolve raw options into a validated [`ServerConfig`].
    pub fn resolve(self) -> Result<ServerConfig, ConfigError> {
        let tls = validation::validate_tls(&self.cert, &self.key)?;
        let port = validation::parse_port(&self.port)?;
        let delay = validation::parse_delay(&self.delay)?;
        let header_pairs = validation::parse_headers(&self.headers)?;
        let content_type_header = validation::parse_content_type(&self.content_type)?;
        let http_code = validation::validate_status(self.http_code)?;
        if let Some(status) = http_code.filter(|s| s.is_informational()) {
            tracing::warn!(
                code = status.as_u16(),
                "1xx is not a final status; HTTP/1 clients will see 101 as an upgrade and any other 1xx as 500"
            );
        }

        let mode = validation::select_mode(&ModeSwitches {
            websocket: self.websocket,
            flood: self.wsflood,
            time: self.time,
            sha: self.sha,
            http_code,
            upload: self.upload_file,
            file: self.file.clone().unwrap_or_default(),
        })?;

        let otel_endpoint = Some(self.otel_endpoint).filter(|e| !e.trim().is_empty());

        Ok(ServerConfig {
            port,
            file: self.file.unwrap_or_default(),
            content_type: self.content_type,
            content_type_header,
            headers: self.headers,
            header_pairs,
            delay,
            tls,
            verbose: self.verbose,
            dump_request: self.dump_req,
            content_length: self.content_length,
            print_rps: self.rps,
            no_keep_alive: self.nokeepalive,
            keep_case: self.keep_case,
            otel_endpoint,
            service_name: self.service_name,
            mode,
        })
    }
}
