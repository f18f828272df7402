mod sync_message;

pub use sync_message::SyncMessage;
