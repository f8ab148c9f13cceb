//! Admin pages, plugin bookkeeping, scripts and widget registrations.

use super::ExpectationStore;
use crate::record::{
    AdminPage, Callback, SidebarWidget, Widget, WidgetControl, WidgetRegistration,
};
use serde_json::Value;

/// Hook name returned by every page registration
pub const PAGE_HOOK_NAME: &str = "hook name";

/// Parent file of the settings menu
pub const OPTIONS_PARENT: &str = "options-general.php";

impl ExpectationStore {
    /// Register a top-level admin menu page
    pub fn add_menu_page(
        &mut self,
        page_title: &str,
        menu_title: &str,
        access_level: &str,
        file: &str,
        function: Option<Callback>,
        icon: Option<&str>,
    ) -> &'static str {
        self.pages.push(AdminPage {
            parent: String::new(),
            page_title: page_title.to_string(),
            menu_title: menu_title.to_string(),
            access_level: access_level.to_string(),
            file: file.to_string(),
            function,
            icon: icon.map(str::to_string),
        });
        PAGE_HOOK_NAME
    }

    /// Register an admin submenu page under `parent`
    pub fn add_submenu_page(
        &mut self,
        parent: &str,
        page_title: &str,
        menu_title: &str,
        access_level: &str,
        file: &str,
        function: Option<Callback>,
    ) -> &'static str {
        self.pages.push(AdminPage {
            parent: parent.to_string(),
            page_title: page_title.to_string(),
            menu_title: menu_title.to_string(),
            access_level: access_level.to_string(),
            file: file.to_string(),
            function,
            icon: None,
        });
        PAGE_HOOK_NAME
    }

    /// Register a settings page (a submenu of the options menu)
    pub fn add_options_page(
        &mut self,
        page_title: &str,
        menu_title: &str,
        access_level: &str,
        file: &str,
        function: Option<Callback>,
    ) -> &'static str {
        self.add_submenu_page(
            OPTIONS_PARENT,
            page_title,
            menu_title,
            access_level,
            file,
            function,
        )
    }

    /// Registered admin pages, in registration order
    #[must_use]
    pub fn admin_pages(&self) -> &[AdminPage] {
        &self.pages
    }

    /// Set whether the rich editor is available
    pub fn set_user_can_richedit(&mut self, can: bool) {
        self.user_can_richedit = can;
    }

    /// Whether the rich editor is available
    #[must_use]
    pub const fn user_can_richedit(&self) -> bool {
        self.user_can_richedit
    }

    /// Record a text-domain load as `"{domain}-{path}"`
    pub fn load_plugin_textdomain(&mut self, domain: &str, path: &str) {
        self.plugin_domains.push(format!("{domain}-{path}"));
    }

    /// Text domains loaded so far
    #[must_use]
    pub fn plugin_domains(&self) -> &[String] {
        &self.plugin_domains
    }

    /// Record a script enqueue
    pub fn enqueue_script(&mut self, handle: &str) {
        self.enqueued.insert(handle.to_string());
    }

    /// Whether a script was enqueued
    #[must_use]
    pub fn did_enqueue_script(&self, handle: &str) -> bool {
        self.enqueued.contains(handle)
    }

    /// Set the header data returned for a plugin file
    pub fn set_plugin_data(&mut self, file: &str, data: impl Into<Value>) {
        self.plugin_data.insert(file.to_string(), data.into());
    }

    /// Header data for a plugin file
    #[must_use]
    pub fn plugin_data(&self, file: &str) -> Option<&Value> {
        self.plugin_data.get(file)
    }

    /// Register a sidebar widget
    pub fn register_sidebar_widget(
        &mut self,
        id: &str,
        name: &str,
        output_callback: impl Into<Callback>,
        options: Value,
    ) {
        self.sidebar_widgets.push(SidebarWidget {
            id: id.to_string(),
            name: name.to_string(),
            output_callback: output_callback.into(),
            options,
        });
    }

    /// Alias of [`register_sidebar_widget`](Self::register_sidebar_widget)
    pub fn wp_register_sidebar_widget(
        &mut self,
        id: &str,
        name: &str,
        output_callback: impl Into<Callback>,
        options: Value,
    ) {
        self.register_sidebar_widget(id, name, output_callback, options);
    }

    /// Register a sidebar widget control
    pub fn register_widget_control(
        &mut self,
        name: &str,
        control_callback: impl Into<Callback>,
        width: Option<u32>,
        height: Option<u32>,
        params: Vec<Value>,
    ) {
        self.widget_controls.push(WidgetControl {
            name: name.to_string(),
            control_callback: control_callback.into(),
            width,
            height,
            params,
        });
    }

    /// Register a widget class and get a handle for its form fields
    pub fn register_widget(
        &mut self,
        id: &str,
        name: &str,
        widget_options: Value,
        control_options: Value,
    ) -> Widget {
        self.widgets.insert(
            id.to_string(),
            WidgetRegistration {
                id: id.to_string(),
                name: name.to_string(),
                widget_options,
                control_options,
            },
        );
        Widget::new(id)
    }

    /// Registered sidebar widgets, in order
    #[must_use]
    pub fn sidebar_widgets(&self) -> &[SidebarWidget] {
        &self.sidebar_widgets
    }

    /// Registered widget controls, in order
    #[must_use]
    pub fn widget_controls(&self) -> &[WidgetControl] {
        &self.widget_controls
    }

    /// A widget-class registration by id
    #[must_use]
    pub fn widget(&self, id: &str) -> Option<&WidgetRegistration> {
        self.widgets.get(id)
    }
}
