mod notice_component;

pub use notice_component::NoticeComponent;
