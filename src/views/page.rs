use serde::Serialize;

use crate::{
    models::{MovieBundle, MovieCredits, MovieInfo, Recommendations},
    services::date_format::format_date,
};

use super::{
    images::{ImageUrls, ImageView, BACKDROP_SIZE, POSTER_SIZE, THUMBNAIL_SIZE},
    labels,
    state::SelectionState,
};

/// Recommendation cards per grid row
pub const CARDS_PER_ROW: usize = 5;

/// Complete page handed to the UI renderer
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PageView {
    pub heading: &'static str,
    pub tagline: &'static str,
    pub notice: &'static str,
    /// Visible warnings for failed remote calls
    pub warnings: Vec<String>,
    /// `None` when no title is selected, the title is unknown, or its info failed to load
    pub searched: Option<SearchedView>,
    /// `None` when no title is selected or the title is unknown
    pub recommendations: Option<RecommendationsView>,
    pub state: SelectionState,
}

/// Hero section for the movie the user liked
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SearchedView {
    pub heading: &'static str,
    pub banner: Banner,
    pub toggle_label: &'static str,
    pub details: Option<DetailPanel>,
}

/// Backdrop with the title overlaid
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Banner {
    pub title: String,
    pub backdrop: ImageView,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecommendationsView {
    Grid {
        heading: &'static str,
        rows: Vec<Vec<Card>>,
        selected: Option<SelectedView>,
    },
    Empty {
        notice: &'static str,
    },
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Card {
    pub index: usize,
    pub title: String,
    pub poster: ImageView,
    pub action_label: &'static str,
}

/// Expanded recommendation below the grid
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SelectedView {
    pub index: usize,
    pub panel: DetailPanel,
    pub collapse_label: &'static str,
}

/// Poster and metadata of one movie
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DetailPanel {
    pub title: String,
    pub poster: ImageView,
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Field {
    pub label: &'static str,
    pub value: String,
}

/// Maps fetched data and the session state to a page
///
/// Pure: the same inputs always give the same page. A selected index that
/// does not exist in `data` renders as if nothing were selected.
pub fn render_page(
    data: Option<&Recommendations>,
    state: &SelectionState,
    images: &ImageUrls,
) -> PageView {
    let mut page = PageView {
        heading: labels::HEADING,
        tagline: labels::TAGLINE,
        notice: labels::SEARCH_NOTICE,
        warnings: vec![],
        searched: None,
        recommendations: None,
        state: *state,
    };

    let Some(data) = data else {
        return page;
    };

    page.warnings = data.warnings.clone();
    page.searched = render_searched(&data.searched, state, images);
    page.recommendations = Some(render_recommendations(&data.recommended, state, images));
    page
}

fn render_searched(
    bundle: &MovieBundle,
    state: &SelectionState,
    images: &ImageUrls,
) -> Option<SearchedView> {
    let info = bundle.info.as_ref()?;
    let title = display_title(Some(info));

    let details = state
        .searched_details_visible
        .then(|| detail_panel(Some(info), bundle.credits.as_ref(), POSTER_SIZE, images));

    Some(SearchedView {
        heading: labels::SEARCHED_HEADING,
        banner: Banner {
            backdrop: images.image(info.backdrop_path.as_deref(), BACKDROP_SIZE, &title),
            title,
        },
        toggle_label: labels::SHOW_MOVIE_DETAILS,
        details,
    })
}

fn render_recommendations(
    recommended: &[MovieBundle],
    state: &SelectionState,
    images: &ImageUrls,
) -> RecommendationsView {
    if recommended.is_empty() {
        return RecommendationsView::Empty {
            notice: labels::NO_RECOMMENDATIONS,
        };
    }

    let cards: Vec<Card> = recommended
        .iter()
        .enumerate()
        .map(|(index, bundle)| {
            let info = bundle.info.as_ref();
            let title = display_title(info);
            Card {
                index,
                poster: images.image(
                    info.and_then(|i| i.poster_path.as_deref()),
                    THUMBNAIL_SIZE,
                    &title,
                ),
                title,
                action_label: labels::SHOW_DETAILS,
            }
        })
        .collect();

    let selected = state
        .selected_recommendation
        .and_then(|index| recommended.get(index).map(|bundle| (index, bundle)))
        .map(|(index, bundle)| SelectedView {
            index,
            panel: detail_panel(
                bundle.info.as_ref(),
                bundle.credits.as_ref(),
                THUMBNAIL_SIZE,
                images,
            ),
            collapse_label: labels::COLLAPSE,
        });

    RecommendationsView::Grid {
        heading: labels::RECOMMENDATIONS_HEADING,
        rows: into_rows(cards, CARDS_PER_ROW),
        selected,
    }
}

/// Splits cards into rows of at most `width`
pub fn into_rows<T>(items: Vec<T>, width: usize) -> Vec<Vec<T>> {
    let mut rows = Vec::new();
    let mut iter = items.into_iter().peekable();
    while iter.peek().is_some() {
        rows.push(iter.by_ref().take(width).collect());
    }
    rows
}

fn display_title(info: Option<&MovieInfo>) -> String {
    info.and_then(|i| i.title.clone())
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| labels::UNKNOWN_TITLE.to_string())
}

fn detail_panel(
    info: Option<&MovieInfo>,
    credits: Option<&MovieCredits>,
    poster_size: &str,
    images: &ImageUrls,
) -> DetailPanel {
    let title = display_title(info);

    let runtime = info
        .and_then(|i| i.runtime)
        .filter(|minutes| *minutes > 0)
        .map(|minutes| format!("{} minutes", minutes))
        .unwrap_or_else(|| labels::UNKNOWN_RUNTIME.to_string());

    let rating = info
        .and_then(|i| i.vote_average)
        .filter(|vote| *vote > 0.0)
        .map(|vote| format!("{:.1}", vote))
        .unwrap_or_else(|| labels::NOT_RATED.to_string());

    let genres = info
        .map(|i| {
            i.genres
                .iter()
                .map(|g| g.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        })
        .unwrap_or_default();

    let release_date = format_date(info.and_then(|i| i.release_date.as_deref()));

    let (directors, actors) = match credits {
        Some(credits) => (credits.directors.join(", "), credits.actors.join(", ")),
        None => (
            labels::CREDITS_UNAVAILABLE.to_string(),
            labels::CREDITS_UNAVAILABLE.to_string(),
        ),
    };

    let overview = info
        .and_then(|i| i.overview.clone())
        .filter(|o| !o.trim().is_empty())
        .unwrap_or_else(|| labels::NO_OVERVIEW.to_string());

    DetailPanel {
        poster: images.image(info.and_then(|i| i.poster_path.as_deref()), poster_size, &title),
        title,
        fields: vec![
            field(labels::RUNTIME, runtime),
            field(labels::RATING, rating),
            field(labels::GENRES, genres),
            field(labels::RELEASE_DATE, release_date),
            field(labels::DIRECTORS, directors),
            field(labels::ACTORS, actors),
            field(labels::OVERVIEW, overview),
        ],
    }
}

fn field(label: &'static str, value: String) -> Field {
    Field { label, value }
}
