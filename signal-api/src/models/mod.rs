use actix::Addr;

use crate::actors::signal_server::SignalServer;

pub struct AppState {
    pub signal: Addr<SignalServer>,
}
