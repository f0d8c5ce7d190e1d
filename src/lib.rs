pub mod error;
pub mod model;
pub mod ops;
pub mod output;
pub mod parser;
pub mod paths;
pub mod validate;
pub mod vault;
pub mod watch;

pub use error::SyncError;
pub use model::{FormattedTask, ReminderLine};
pub use ops::{process_tasks, process_tasks_with, SyncOptions, SyncReport};
pub use parser::{add_one_hour, parse_line};
pub use vault::{FsVault, MemoryVault, Node, Vault};
