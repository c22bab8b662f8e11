mod carousel;
mod grid;
mod ingest;
mod services;
mod system;

pub(super) use carousel::CarouselView;
pub(super) use ingest::{BrowseRow, IngestView};
pub(super) use services::{DetailState, ServiceDetail, ServicesView};
pub(super) use system::SystemView;
