//! Dashboard: one tab of panels per domain, one group at a time
//!
//! Only the active tab is mounted. Switching tabs unmounts the panels being
//! left, which cancels whatever they still had in flight.

use crate::metrics::{Domain, MetricId};
use crate::models::GroupId;
use crate::panel::Panel;
use crate::source::MetricSource;
use crate::theme::ThemeWatcher;
use std::sync::Arc;
use tracing::info;

/// Panels of one domain
pub struct DashboardTab {
    pub domain: Domain,
    pub panels: Vec<Panel>,
}

pub struct Dashboard {
    source: Arc<dyn MetricSource>,
    themes: Arc<ThemeWatcher>,
    groups: Vec<GroupId>,
    group: Option<GroupId>,
    tabs: Vec<DashboardTab>,
    active: usize,
    mounted: bool,
}

impl Dashboard {
    pub fn new(
        source: Arc<dyn MetricSource>,
        themes: Arc<ThemeWatcher>,
        groups: Vec<GroupId>,
        group: Option<GroupId>,
    ) -> Self {
        let mut groups = groups;
        if let Some(g) = &group {
            if !groups.contains(g) {
                groups.push(g.clone());
            }
        }

        let tabs = Domain::all()
            .iter()
            .map(|&domain| DashboardTab {
                domain,
                panels: domain
                    .metrics()
                    .into_iter()
                    .map(|metric| {
                        Panel::new(
                            metric,
                            Arc::clone(&source),
                            Arc::clone(&themes),
                            group.clone(),
                        )
                    })
                    .collect(),
            })
            .collect();

        Self {
            source,
            themes,
            groups,
            group,
            tabs,
            active: 0,
            mounted: false,
        }
    }

    /// Mount the active tab's panels
    pub fn mount(&mut self) {
        self.mounted = true;
        for panel in &mut self.tabs[self.active].panels {
            panel.mount();
        }
        info!(
            tab = self.active_domain().name(),
            group = self.group.as_ref().map(GroupId::as_str).unwrap_or("-"),
            source = %self.source.describe(),
            "Dashboard mounted"
        );
    }

    /// Unmount everything (shutdown)
    pub fn unmount(&mut self) {
        self.mounted = false;
        for tab in &mut self.tabs {
            for panel in &mut tab.panels {
                panel.unmount();
            }
        }
    }

    pub fn themes(&self) -> &Arc<ThemeWatcher> {
        &self.themes
    }

    pub fn source_description(&self) -> String {
        self.source.describe()
    }

    pub fn tabs(&self) -> &[DashboardTab] {
        &self.tabs
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_domain(&self) -> Domain {
        self.tabs[self.active].domain
    }

    /// Panels of the active tab
    pub fn panels(&self) -> &[Panel] {
        &self.tabs[self.active].panels
    }

    pub fn panel(&self, metric: MetricId) -> Option<&Panel> {
        self.tabs
            .iter()
            .flat_map(|t| t.panels.iter())
            .find(|p| p.metric() == metric)
    }

    /// Switch tab; unmounts the old tab and mounts the new one
    pub fn select_tab(&mut self, index: usize) {
        if index >= self.tabs.len() || index == self.active {
            return;
        }

        for panel in &mut self.tabs[self.active].panels {
            panel.unmount();
        }
        self.active = index;
        if self.mounted {
            for panel in &mut self.tabs[self.active].panels {
                panel.mount();
            }
        }
    }

    pub fn next_tab(&mut self) {
        self.select_tab((self.active + 1) % self.tabs.len());
    }

    pub fn prev_tab(&mut self) {
        self.select_tab((self.active + self.tabs.len() - 1) % self.tabs.len());
    }

    pub fn group(&self) -> Option<&GroupId> {
        self.group.as_ref()
    }

    pub fn groups(&self) -> &[GroupId] {
        &self.groups
    }

    /// Re-target every panel; mounted ones refetch immediately
    pub fn set_group(&mut self, group: Option<GroupId>) {
        if self.group == group {
            return;
        }
        info!(group = group.as_ref().map(GroupId::as_str).unwrap_or("-"), "Group changed");
        self.group = group;
        for tab in &mut self.tabs {
            for panel in &mut tab.panels {
                panel.set_group(self.group.clone());
            }
        }
    }

    /// Cycle forward through configured groups
    pub fn next_group(&mut self) {
        self.step_group(1);
    }

    pub fn prev_group(&mut self) {
        self.step_group(self.groups.len().saturating_sub(1));
    }

    fn step_group(&mut self, step: usize) {
        if self.groups.is_empty() {
            return;
        }
        let next = match self
            .group
            .as_ref()
            .and_then(|g| self.groups.iter().position(|x| x == g))
        {
            Some(pos) => (pos + step) % self.groups.len(),
            None => 0,
        };
        self.set_group(Some(self.groups[next].clone()));
    }

    /// Refetch the active tab
    pub fn refresh(&mut self) {
        for panel in &mut self.tabs[self.active].panels {
            panel.refresh();
        }
    }
}

impl Drop for Dashboard {
    fn drop(&mut self) {
        self.unmount();
    }
}
