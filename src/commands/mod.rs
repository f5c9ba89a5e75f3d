pub mod network;

pub use network::{get_local_ip, NetworkInfo, GET_LOCAL_IP_COMMAND};

use crate::bridge::CommandRouter;

/// Registers every command this host implements.
pub fn register_all(router: CommandRouter) -> CommandRouter {
    router.register(GET_LOCAL_IP_COMMAND, get_local_ip)
}
