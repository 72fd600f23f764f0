//! Widget factory: turns widget options into the description the UI renders.

use hookdash_types::{Item, LayoutConfig, WidgetConfig};

/// Identifier the dashboard registers the widget under.
pub const WIDGET_NAME: &str = "cloudflare-widget";

/// Text of the card shown when the options list no sites.
pub const MISSING_SITES_MESSAGE: &str = "No sites are defined in the widget options. Please check your config.";

/// A ready-to-render widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardWidget {
    pub name: &'static str,
    pub layout: LayoutConfig,
    pub view: WidgetView,
}

/// Which view the widget shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetView {
    /// The site list with its header.
    Sites { title: String, items: Vec<Item> },
    /// Critical card telling the user no sites are configured.
    MissingSites,
}

impl DashboardWidget {
    pub fn title(&self) -> Option<&str> {
        match &self.view {
            WidgetView::Sites { title, .. } => Some(title),
            WidgetView::MissingSites => None,
        }
    }

    pub fn items(&self) -> &[Item] {
        match &self.view {
            WidgetView::Sites { items, .. } => items,
            WidgetView::MissingSites => &[],
        }
    }
}

/// Builds the deploy widget from its options.
///
/// An absent or empty `sites` list yields [`WidgetView::MissingSites`]; a
/// missing layout yields a medium-width layout.
pub fn deploy_widget(config: &WidgetConfig) -> DashboardWidget {
    let layout = config.layout.unwrap_or(LayoutConfig::default_for_widget());
    let view = if config.has_sites() {
        WidgetView::Sites {
            title: config.display_title().to_string(),
            items: Item::from_sites(config.sites()),
        }
    } else {
        WidgetView::MissingSites
    };
    DashboardWidget {
        name: WIDGET_NAME,
        layout,
        view,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hookdash_types::{DEFAULT_WIDGET_TITLE, ItemId, LayoutHeight, LayoutWidth, Site};

    fn site(title: &str, hook: Option<&str>) -> Site {
        Site {
            title: title.into(),
            url: format!("https://{}.example.com", title.to_lowercase()),
            deploy_hook: hook.map(str::to_string),
        }
    }

    #[test]
    fn builds_site_list_with_default_layout() {
        let config = WidgetConfig {
            sites: Some(vec![site("Docs", Some("https://hooks.example.com/docs")), site("Blog", None)]),
            ..WidgetConfig::default()
        };

        let widget = deploy_widget(&config);
        assert_eq!(widget.name, "cloudflare-widget");
        assert_eq!(widget.layout.width, Some(LayoutWidth::Medium));
        assert_eq!(widget.title(), Some(DEFAULT_WIDGET_TITLE));

        let items = widget.items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, ItemId(0));
        assert_eq!(items[0].action_endpoint.as_deref(), Some("https://hooks.example.com/docs"));
        assert!(!items[1].has_action());
    }

    #[test]
    fn keeps_custom_layout_and_title() {
        let config = WidgetConfig {
            title: Some("Production".into()),
            sites: Some(vec![site("Shop", None)]),
            layout: Some(LayoutConfig {
                width: Some(LayoutWidth::Full),
                height: Some(LayoutHeight::Full),
            }),
            ..WidgetConfig::default()
        };

        let widget = deploy_widget(&config);
        assert_eq!(widget.layout.width, Some(LayoutWidth::Full));
        assert_eq!(widget.layout.height, Some(LayoutHeight::Full));
        assert_eq!(widget.title(), Some("Production"));
    }

    #[test]
    fn missing_or_empty_sites_show_the_critical_card() {
        let absent = deploy_widget(&WidgetConfig::default());
        assert_eq!(absent.view, WidgetView::MissingSites);
        assert!(absent.items().is_empty());
        assert_eq!(absent.title(), None);

        let empty = deploy_widget(&WidgetConfig {
            sites: Some(Vec::new()),
            ..WidgetConfig::default()
        });
        assert_eq!(empty.view, WidgetView::MissingSites);
    }
}
