pub mod grant;
pub mod room;

pub use grant::{AccessGrant, AccessGrantRequest, AccessTokenClaims, HostMetadata, VideoGrant};
pub use room::{
    CreateRoomRequest, EndMeetingResponse, MessageResponse, ParticipantList, ParticipantRecord,
    RoomRecord, RoomSummary,
};
