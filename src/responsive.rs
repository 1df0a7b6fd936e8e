use crate::query::QueryMap;

/// Width breakpoints in pixels, as lower bounds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridBreakpoints {
    pub xs: f64,
    pub sm: f64,
    pub md: f64,
    pub lg: f64,
    pub xl: f64,
    pub xxl: f64,
}

impl Default for GridBreakpoints {
    fn default() -> Self {
        Self {
            xs: 0.0,
            sm: 576.0,
            md: 768.0,
            lg: 992.0,
            xl: 1200.0,
            xxl: 1400.0,
        }
    }
}

impl GridBreakpoints {
    pub fn query_map(&self) -> QueryMap {
        QueryMap::new()
            .with("xs", self.xs)
            .with("sm", self.sm)
            .with("md", self.md)
            .with("lg", self.lg)
            .with("xl", self.xl)
            .with("xxl", self.xxl)
    }
}

impl From<GridBreakpoints> for QueryMap {
    fn from(breakpoints: GridBreakpoints) -> Self {
        breakpoints.query_map()
    }
}

impl QueryMap {
    /// The default [`GridBreakpoints`] as a query map.
    pub fn grid() -> Self {
        GridBreakpoints::default().query_map()
    }
}

#[cfg(test)]
mod tests {
    use super::GridBreakpoints;
    use crate::{headless::HeadlessViewport, provider::MediaQueryProvider, query::QueryMap};

    #[test]
    fn grid_labels_in_order() {
        let labels: Vec<_> = QueryMap::grid().labels().map(String::from).collect();
        assert_eq!(labels, ["xs", "sm", "md", "lg", "xl", "xxl"]);
    }

    #[test]
    fn widest_match_at_each_width() {
        let viewport = HeadlessViewport::new(0.0);
        let provider = MediaQueryProvider::new(viewport.clone(), QueryMap::grid());
        let reader = provider.reader();

        for (width, expected) in [
            (100.0, "xs"),
            (576.0, "sm"),
            (800.0, "md"),
            (1000.0, "lg"),
            (1399.0, "xl"),
            (1920.0, "xxl"),
        ] {
            viewport.resize(width);
            let widest = reader
                .try_with(|snapshot| snapshot.last_match().map(String::from))
                .flatten();
            assert_eq!(widest.as_deref(), Some(expected), "width {width}");
        }
    }

    #[test]
    fn custom_breakpoints() {
        let breakpoints = GridBreakpoints {
            md: 700.0,
            ..GridBreakpoints::default()
        };
        let queries = QueryMap::from(breakpoints);
        assert_eq!(
            queries.queries().nth(2).map(|(_, q)| q.to_string()),
            Some("(min-width: 700px)".to_string())
        );
    }
}
