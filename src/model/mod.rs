mod config;
mod ingest;
mod report;
mod scalar;
mod wire;

pub use self::config::{ConsoleConfig, Timeouts};
pub use self::ingest::{
    ActionResult, Announcement, AnnouncementSet, AnnouncementSlot, ChunkListing, ChunkListingMeta,
    ChunkValidation, CommitAck, MaintenanceResult, SchemeListing, SchemeSummary, SchemeValidation,
    TargetAck, UpdateCheck,
};
pub use self::report::{Entry, EntryId, EntryState, OverallState, SERIES_LIMIT, StatusReport};
pub use self::scalar::{Scalar, de_truthy};
pub use self::wire::{
    CarouselFile, CarouselReport, CarouselStream, CarouselTiming, ModuleStatus, ServiceChannel,
    ServiceEvent, ServiceGrabber, ServiceInfo, ServiceReport, SystemModules, SystemReport,
};
