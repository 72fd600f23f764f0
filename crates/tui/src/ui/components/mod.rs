//! UI components: site list, notice modal, missing-sites card.

pub mod component;
pub mod missing_sites;
pub mod notice;
pub mod sites;

pub use component::*;
pub use missing_sites::MissingSitesComponent;
pub use notice::NoticeComponent;
pub use sites::SitesComponent;
