pub mod message;
pub mod remote;
pub mod settings;
pub mod snapshot;
pub mod submission;

pub use message::{Request, Response};
pub use remote::{
    PutFileRequest, RemoteFileHandle, RepoTarget, SyncAction, SyncOutcome, WrittenFile,
};
pub use settings::{ContentMode, FolderLayout, SyncSettings};
pub use snapshot::{ElementProbe, PageSignals, PageSnapshot};
pub use submission::{Difficulty, SolutionSubmission};
