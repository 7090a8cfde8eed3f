//! Domain model (ids, artifact, user, views, events, errors).

pub mod artifact;
pub mod errors;
pub mod events;
pub mod ids;
pub mod user;
pub mod views;

pub use self::artifact::{
    Artifact, ArtifactDraft, Comment, LikeSet, normalize_comment_text, validate_comment_text,
};
pub use self::errors::{ArtifactError, ErrorKind};
pub use self::events::ArtifactCreated;
pub use self::ids::{ArtifactId, CommentId, ParseIdError, UserId};
pub use self::user::{UserProfile, UserProjection};
pub use self::views::{ArtifactView, CommentView, CommentsView, LikeToggle, LikesView};
