//! French UI strings.

pub const HEADING: &str = "Qu'est-ce qu'on regarde ce soir ?";
pub const TAGLINE: &str = "✨ Cherchez un film que vous avez aimé, on se charge de vous trouver quelques recommandations pour ce soir ✨";
pub const SELECTOR_PROMPT: &str = "🔍 Quel film avez-vous aimé ?";
pub const SEARCH_NOTICE: &str = "ℹ️ La recherche se base sur le titre du film uniquement";

pub const SEARCHED_HEADING: &str = "💖 Vous avez aimé";
pub const RECOMMENDATIONS_HEADING: &str = "✨ Nos recommandations";
pub const NO_RECOMMENDATIONS: &str = "Aucune recommandation trouvée.";

pub const SHOW_MOVIE_DETAILS: &str = "Voir les détails du film";
pub const SHOW_DETAILS: &str = "Voir les détails";
pub const COLLAPSE: &str = "Réduire 🔼";

pub const RUNTIME: &str = "🕔 Durée";
pub const RATING: &str = "⭐ Note";
pub const GENRES: &str = "🎭 Genre·s";
pub const RELEASE_DATE: &str = "📅 Date de sortie";
pub const DIRECTORS: &str = "🎬 Réalisateur·rice·s";
pub const ACTORS: &str = "🧑‍🎤 Acteur·rice·s principal·e·s";
pub const OVERVIEW: &str = "📖 Résumé";

// Placeholders
pub const UNKNOWN_TITLE: &str = "Titre inconnu";
pub const NO_POSTER: &str = "Aucune affiche disponible";
pub const UNKNOWN_RUNTIME: &str = "Durée inconnue";
pub const NOT_RATED: &str = "Non noté";
pub const NO_OVERVIEW: &str = "Pas de résumé disponible";
pub const CREDITS_UNAVAILABLE: &str = "Information indisponible";
