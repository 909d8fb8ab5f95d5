use crate::normalize::normalize;
use crate::similarity::key_similarity;
use crate::types::{BestMatch, MatchedOn};

/// Best score of `query` against a primary name and its aliases.
///
/// The alias wins only when it scores strictly higher than the primary name;
/// ties and subjects without aliases are attributed to the name.
pub fn best_match<S: AsRef<str>>(query: &str, primary_name: &str, aliases: &[S]) -> BestMatch {
    best_match_key(&normalize(query), primary_name, aliases)
}

/// [`best_match`] with the query key normalized once by the caller.
pub(crate) fn best_match_key<S: AsRef<str>>(
    query_key: &str,
    primary_name: &str,
    aliases: &[S],
) -> BestMatch {
    let name_score = key_similarity(query_key, &normalize(primary_name));
    let alias_score = aliases
        .iter()
        .map(|alias| key_similarity(query_key, &normalize(alias.as_ref())))
        .max()
        .unwrap_or(0);

    if alias_score > name_score {
        BestMatch {
            score: alias_score,
            matched_on: MatchedOn::Alias,
        }
    } else {
        BestMatch {
            score: name_score,
            matched_on: MatchedOn::Name,
        }
    }
}
