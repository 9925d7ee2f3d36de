pub mod cancel;
pub mod complete;
pub mod evidence;
pub mod handlers;
pub mod publish;
pub mod quotes;
pub mod status;
