//! Shared type definitions for the hookdash workspace.

mod action;
mod config;

pub use action::{ActionReport, ActionResult, FailureReason, Item, ItemId, ItemRenderStatus, Notice, Severity};
pub use config::{
    DEFAULT_WIDGET_TITLE, LayoutConfig, LayoutHeight, LayoutWidth, Site, TransportMode, TransportSettings, WidgetConfig,
};

/// Messages that can be sent to update the application state.
///
/// This enum defines the user actions and system events that can trigger
/// state changes in the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Periodic UI tick (throbbers)
    Tick,
    /// Terminal resized
    Resize(u16, u16),
    /// A deploy task finished and the coordinator is idle again
    DeployFinished(ActionReport),
    /// A notice was raised for the user
    NoticeRaised(Notice),
}

/// Side effects that can be triggered by state changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fire the action for the given item through the coordinator
    TriggerDeploy(ItemId),
    /// Copy text to the system clipboard
    CopyToClipboard(String),
    /// Dismiss the notice currently shown
    DismissNotice,
    /// Leave the application
    Quit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widget_config_parses_dashboard_options() {
        let json = r#"{
            "title": "My Sites",
            "sites": [
                { "title": "Docs", "url": "https://docs.example.com", "deployHook": "https://hooks.example.com/a" },
                { "title": "Blog", "url": "https://blog.example.com", "deployHook": "" },
                { "title": "Shop", "url": "https://shop.example.com" }
            ],
            "layout": { "width": "large" }
        }"#;

        let config: WidgetConfig = serde_json::from_str(json).expect("deserialize WidgetConfig");
        assert_eq!(config.display_title(), "My Sites");
        assert_eq!(config.sites().len(), 3);
        assert_eq!(config.sites()[0].deploy_hook(), Some("https://hooks.example.com/a"));
        assert_eq!(config.sites()[1].deploy_hook(), None);
        assert_eq!(config.sites()[2].deploy_hook(), None);
        assert_eq!(config.layout.and_then(|layout| layout.width), Some(LayoutWidth::Large));
        assert_eq!(config.transport.mode, TransportMode::NoCors);
    }

    #[test]
    fn missing_title_and_sites_fall_back() {
        let config: WidgetConfig = serde_json::from_str("{}").expect("deserialize empty config");
        assert_eq!(config.display_title(), DEFAULT_WIDGET_TITLE);
        assert!(config.sites.is_none());
        assert!(!config.has_sites());

        let blank_title = WidgetConfig {
            title: Some("   ".into()),
            ..WidgetConfig::default()
        };
        assert_eq!(blank_title.display_title(), DEFAULT_WIDGET_TITLE);
    }

    #[test]
    fn transport_settings_parse_from_yaml() {
        let yaml = r#"
sites:
  - title: Docs
    url: https://docs.example.com
transport:
  origin: https://dashboard.example.com
  mode: cors
  timeoutSecs: 20
"#;
        let config: WidgetConfig = serde_yaml::from_str(yaml).expect("deserialize yaml config");
        assert_eq!(config.transport.origin.as_deref(), Some("https://dashboard.example.com"));
        assert_eq!(config.transport.mode, TransportMode::Cors);
        assert_eq!(config.transport.timeout_secs, Some(20));
    }

    #[test]
    fn items_use_list_index_and_drop_blank_hooks() {
        let sites = vec![
            Site {
                title: "One".into(),
                url: "https://one.example.com".into(),
                deploy_hook: Some("https://hooks.example.com/1".into()),
            },
            Site {
                title: "Two".into(),
                url: "https://two.example.com".into(),
                deploy_hook: Some("  ".into()),
            },
        ];
        let items = Item::from_sites(&sites);
        assert_eq!(items[0].id, ItemId(0));
        assert!(items[0].has_action());
        assert_eq!(items[1].id, ItemId(1));
        assert!(!items[1].has_action());
        assert_eq!(items[1].action_endpoint, None);
    }

    #[test]
    fn render_status_is_projection_of_active_item() {
        assert_eq!(ItemRenderStatus::derive(ItemId(0), None), ItemRenderStatus::Idle);
        assert_eq!(ItemRenderStatus::derive(ItemId(0), Some(ItemId(0))), ItemRenderStatus::Running);
        assert_eq!(
            ItemRenderStatus::derive(ItemId(1), Some(ItemId(0))),
            ItemRenderStatus::BlockedByOther
        );
    }

    #[test]
    fn notices_map_one_per_outcome() {
        assert_eq!(Notice::from(ActionResult::Success), Notice::TriggeredSuccessfully);
        assert_eq!(
            Notice::from(ActionResult::Failure(FailureReason::NoEndpoint)),
            Notice::NoEndpointConfigured
        );
        assert_eq!(Notice::from(ActionResult::Failure(FailureReason::Transport)), Notice::TriggerFailed);
        assert_eq!(
            Notice::from(ActionResult::Failure(FailureReason::NonSuccessStatus)),
            Notice::TriggerFailed
        );
        assert_eq!(Notice::TriggerFailed.to_string(), "Error triggering deployment");
        assert_eq!(FailureReason::NoEndpoint.to_string(), "no endpoint configured");
    }
}
