pub mod stats;
pub mod subject;
pub mod timer;
pub mod user;

pub use stats::UserStats;
pub use subject::{
    CreateSubjectRequest, CreateTopicRequest, ReorderTopicsRequest, Subject, Topic,
    UpdateSubjectRequest, UpdateTopicRequest,
};
pub use timer::{
    RecordSessionRequest, SessionKind, TimerSession, TimerSettings, UpdateSettingsRequest,
};
pub use user::{AuthResponse, Claims, LoginRequest, RegisterRequest, User, UserInfo};
