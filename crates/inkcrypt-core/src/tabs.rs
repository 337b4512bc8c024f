/// Panels of the client. Exactly one is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tab {
    #[default]
    Sign,
    Verify,
    Revoke,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Sign, Tab::Verify, Tab::Revoke];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Sign => "Sign PDF",
            Tab::Verify => "Verify PDF",
            Tab::Revoke => "Revoke",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TabNavigator {
    active: Tab,
}

impl TabNavigator {
    pub fn active(&self) -> Tab {
        self.active
    }

    pub fn is_active(&self, tab: Tab) -> bool {
        self.active == tab
    }

    pub fn activate(&mut self, tab: Tab) {
        if self.active != tab {
            tracing::debug!(from = ?self.active, to = ?tab, "switching tab");
        }
        self.active = tab;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activation_is_mutually_exclusive() {
        let mut tabs = TabNavigator::default();
        assert!(tabs.is_active(Tab::Sign));

        tabs.activate(Tab::Revoke);
        let active: Vec<Tab> = Tab::ALL.into_iter().filter(|t| tabs.is_active(*t)).collect();
        assert_eq!(active, vec![Tab::Revoke]);
    }
}
