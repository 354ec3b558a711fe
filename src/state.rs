use serde::Serialize;

use crate::types::{Channel, SummaryBundle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Tab {
    Overview,
    Tasks,
    Departments,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Overview, Tab::Tasks, Tab::Departments];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Overview => "Overview",
            Tab::Tasks => "Tasks & Modes",
            Tab::Departments => "Departments",
        }
    }

    pub fn index(&self) -> usize {
        Tab::ALL.iter().position(|t| t == self).unwrap_or(0)
    }

    fn next(self) -> Tab {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    fn prev(self) -> Tab {
        Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }
}

/// Where the active bundle came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BundleSource {
    Generated,
    Uploaded,
}

impl BundleSource {
    pub fn label(&self) -> &'static str {
        match self {
            BundleSource::Generated => "sample data",
            BundleSource::Uploaded => "uploaded log",
        }
    }
}

/// Everything the dashboard needs to render a frame. UI code never mutates
/// fields directly; all transitions go through [`DashboardState::apply`],
/// which keeps the aggregation core testable without a terminal.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardState {
    pub tab: Tab,
    pub channel: Channel,
    pub source: BundleSource,
    pub bundle: SummaryBundle,
    pub notice: Option<String>,
    pub loading: bool,
    pub should_quit: bool,
}

#[derive(Debug, Clone)]
pub enum DashboardEvent {
    NextTab,
    PrevTab,
    CycleChannel,
    ReloadStarted,
    /// A load completed. Replaces the active bundle wholesale; when loads
    /// overlap, the later completion wins.
    BundleLoaded(SummaryBundle),
    /// A load failed. The active bundle is left untouched.
    LoadFailed(String),
    DismissNotice,
    Quit,
}

impl DashboardState {
    pub fn new(bundle: SummaryBundle, source: BundleSource) -> Self {
        Self {
            tab: Tab::Overview,
            channel: Channel::All,
            source,
            bundle,
            notice: None,
            loading: false,
            should_quit: false,
        }
    }

    pub fn apply(&mut self, event: DashboardEvent) {
        match event {
            DashboardEvent::NextTab => self.tab = self.tab.next(),
            DashboardEvent::PrevTab => self.tab = self.tab.prev(),
            DashboardEvent::CycleChannel => self.channel = self.channel.next(),
            DashboardEvent::ReloadStarted => {
                self.loading = true;
                self.notice = None;
            }
            DashboardEvent::BundleLoaded(bundle) => {
                self.bundle = bundle;
                self.source = BundleSource::Uploaded;
                self.loading = false;
                self.notice = None;
            }
            DashboardEvent::LoadFailed(reason) => {
                self.loading = false;
                self.notice = Some(reason);
            }
            DashboardEvent::DismissNotice => self.notice = None,
            DashboardEvent::Quit => self.should_quit = true,
        }
    }
}
