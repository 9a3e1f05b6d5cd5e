use actix::*;
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use log::{debug, info, warn};
use std::time::Instant;
use uuid::Uuid;

use crate::models::{ClientMessage, ConnectionId, LobbyWebSocketMessage};
use crate::state::AppState;

/// WebSocket actor, one per connected client
pub struct LobbyWebSocket {
    pub id: ConnectionId,
    pub app_state: web::Data<AppState>,
    /// Last time the client showed signs of life.
    hb: Instant,
}

impl LobbyWebSocket {
    pub fn new(app_state: web::Data<AppState>) -> Self {
        Self {
            id: Uuid::new_v4(),
            app_state,
            hb: Instant::now(),
        }
    }

    /// Pings the client and stops the actor once it has been silent too long.
    fn heartbeat(&self, ctx: &mut ws::WebsocketContext<Self>) {
        let interval = self.app_state.config.heartbeat_interval;
        let timeout = self.app_state.config.client_timeout;

        ctx.run_interval(interval, move |act, ctx| {
            if Instant::now().duration_since(act.hb) > timeout {
                info!("Connection {} timed out", act.id);
                ctx.stop();
                return;
            }
            ctx.ping(b"");
        });
    }

    fn handle_text(&mut self, text: &str) {
        let message = match serde_json::from_str::<ClientMessage>(text) {
            Ok(message) => message,
            Err(e) => {
                warn!("Error parsing message from {}: {}", self.id, e);
                return;
            }
        };
        debug!("Parsed client message from {}: {:?}", self.id, message);

        self.app_state.dispatch(self.id, message);
    }
}

impl Actor for LobbyWebSocket {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        info!("WebSocket connection started: {}", self.id);
        self.heartbeat(ctx);
        self.app_state.connect(self.id, ctx.address());
    }

    fn stopping(&mut self, _: &mut Self::Context) -> Running {
        info!("WebSocket connection closed: {}", self.id);
        self.app_state.disconnect(self.id);
        Running::Stop
    }
}

impl Handler<LobbyWebSocketMessage> for LobbyWebSocket {
    type Result = ();

    fn handle(&mut self, msg: LobbyWebSocketMessage, ctx: &mut Self::Context) {
        ctx.text(msg.0);
    }
}

// WebSocket message handler
impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for LobbyWebSocket {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(msg)) => {
                self.hb = Instant::now();
                ctx.pong(&msg);
            }
            Ok(ws::Message::Pong(_)) => {
                self.hb = Instant::now();
            }
            Ok(ws::Message::Text(text)) => {
                self.hb = Instant::now();
                self.handle_text(&text);
            }
            Ok(ws::Message::Binary(_)) => {
                warn!("Binary messages are not supported ({})", self.id);
            }
            Ok(ws::Message::Close(reason)) => {
                info!("Connection {} closed: {:?}", self.id, reason);
                ctx.close(reason);
                ctx.stop();
            }
            Ok(ws::Message::Nop) => {}
            Ok(ws::Message::Continuation(_)) | Err(_) => {
                ctx.stop();
            }
        }
    }
}

/// WebSocket connection handler
pub async fn ws_index(
    req: HttpRequest,
    stream: web::Payload,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let ws = LobbyWebSocket::new(app_state.clone());
    info!("New WebSocket connection: {}", ws.id);
    ws::start(ws, &req, stream)
}
