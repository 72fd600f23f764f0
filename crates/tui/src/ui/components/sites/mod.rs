mod sites_component;
pub mod view;

pub use sites_component::SitesComponent;
