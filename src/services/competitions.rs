use crate::models::soccer::FootballApiError;

/// Competitions the provider exposes to this account, mapped to the
/// provider's numeric competition ids.
pub const SUPPORTED_COMPETITIONS: [(&str, i64); 8] = [
    ("serie a", 2019),
    ("premier league", 2021),
    ("champions league", 2001),
    ("ligue 1", 2015),
    ("bundesliga", 2002),
    ("spanish league", 2014),
    ("world cup", 2000),
    ("euros", 2018),
];

/// Resolves a human-readable competition name, case-insensitively, to the
/// provider id.
pub fn resolve(name: &str) -> Result<i64, FootballApiError> {
    let wanted = name.trim().to_lowercase();
    SUPPORTED_COMPETITIONS
        .iter()
        .find(|(known, _)| *known == wanted)
        .map(|(_, id)| *id)
        .ok_or_else(|| FootballApiError::UnknownCompetition {
            name: name.to_string(),
            supported: supported(),
        })
}

/// Supported names in registry order.
pub fn supported() -> Vec<&'static str> {
    SUPPORTED_COMPETITIONS.iter().map(|(name, _)| *name).collect()
}
