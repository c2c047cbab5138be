use serde::Serialize;

use crate::stats::{
    self, ChartSlice, CountryDetailPoint, Statistic, DASHBOARD_TITLE,
};
use crate::store::{LoadStatus, StoreSnapshot};

// ---------------------------------------------------------------------------
// View state
// ---------------------------------------------------------------------------

/// What a presenter should render for a page, independent of rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ViewState {
    /// No load attempt has settled yet.
    Loading,

    /// The last load attempt failed.
    Error { message: String },

    /// The dashboard page.
    Dashboard {
        title: String,
        statistics: Vec<Statistic>,
        /// Total medals per country, for the pie chart.
        medals: Vec<ChartSlice>,
    },

    /// The details page of one country. Empty series when the country is
    /// unknown.
    Details {
        country: String,
        statistics: Vec<Statistic>,
        series: Vec<CountryDetailPoint>,
    },
}

/// Build the dashboard page from a store snapshot.
pub fn dashboard_view(snapshot: &StoreSnapshot) -> ViewState {
    settled(snapshot).unwrap_or_else(|| {
        let dataset = snapshot.dataset.as_deref();
        ViewState::Dashboard {
            title: DASHBOARD_TITLE.to_string(),
            statistics: stats::dashboard_statistics(dataset),
            medals: stats::medals_per_country(dataset),
        }
    })
}

/// Build the details page of `country_id` from a store snapshot.
pub fn details_view(snapshot: &StoreSnapshot, country_id: &str) -> ViewState {
    settled(snapshot).unwrap_or_else(|| {
        let dataset = snapshot.dataset.as_deref();
        ViewState::Details {
            country: country_id.to_string(),
            statistics: stats::country_statistics(dataset, country_id),
            series: stats::country_detail_series(dataset, country_id),
        }
    })
}

/// The loading and error pages, which do not depend on the route.
fn settled(snapshot: &StoreSnapshot) -> Option<ViewState> {
    match snapshot.status {
        LoadStatus::Idle | LoadStatus::Loading => Some(ViewState::Loading),
        LoadStatus::Failed => Some(ViewState::Error {
            message: snapshot.error.clone().unwrap_or_default(),
        }),
        LoadStatus::Loaded => None,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::data::model::{Country, Dataset, Participation};

    fn loaded() -> StoreSnapshot {
        let ds = Dataset::from_countries(vec![Country {
            country: "France".into(),
            participations: vec![Participation {
                year: 2016,
                city: "Rio de Janeiro".into(),
                medals_count: 45,
                athlete_count: 401,
            }],
        }])
        .unwrap();
        StoreSnapshot {
            status: LoadStatus::Loaded,
            dataset: Some(Arc::new(ds)),
            error: None,
        }
    }

    #[test]
    fn unsettled_store_is_loading() {
        let mut snap = StoreSnapshot::default();
        assert_eq!(dashboard_view(&snap), ViewState::Loading);
        snap.status = LoadStatus::Loading;
        assert_eq!(details_view(&snap, "France"), ViewState::Loading);
    }

    #[test]
    fn failed_store_shows_message() {
        let snap = StoreSnapshot {
            status: LoadStatus::Failed,
            dataset: Some(Arc::new(Dataset::default())),
            error: Some("nope".into()),
        };
        assert_eq!(
            dashboard_view(&snap),
            ViewState::Error {
                message: "nope".into()
            }
        );
    }

    #[test]
    fn dashboard_carries_stats_and_medals() {
        let ViewState::Dashboard {
            title,
            statistics,
            medals,
        } = dashboard_view(&loaded())
        else {
            panic!("expected dashboard");
        };
        assert_eq!(title, "Medals per Country");
        assert_eq!(statistics.len(), 2);
        assert_eq!(medals[0].value, 45);
    }

    #[test]
    fn details_of_unknown_country_are_empty() {
        assert_eq!(
            details_view(&loaded(), "Narnia"),
            ViewState::Details {
                country: "Narnia".into(),
                statistics: vec![],
                series: vec![],
            }
        );
    }

    #[test]
    fn view_serializes_with_state_tag() {
        let json = serde_json::to_value(details_view(&loaded(), "France")).unwrap();
        assert_eq!(json["state"], "details");
        assert_eq!(json["series"][0]["extra"]["code"], "2016");
    }
}
