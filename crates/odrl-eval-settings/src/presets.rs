use odrl_eval_domain::PresetOracle;
use odrl_eval_types::{Category, Outcome};

pub const PROFILES: [&str; 3] = ["blank", "permissive", "restrictive"];

/// Oracle profiles are opinionated category defaults.
///
/// Keep these small and readable. Anything case-specific belongs in the case file.
pub fn profile_oracle(profile: &str) -> anyhow::Result<PresetOracle> {
    match profile {
        "blank" => Ok(PresetOracle::new()),
        "permissive" => Ok(uniform(Outcome::Positive)),
        "restrictive" => Ok(uniform(Outcome::Negative)),
        other => anyhow::bail!(
            "unknown profile: {other} (expected {})",
            PROFILES.join("|")
        ),
    }
}

fn uniform(outcome: Outcome) -> PresetOracle {
    let mut oracle = PresetOracle::new();
    for category in Category::ALL {
        oracle.set_default(category, outcome);
    }
    oracle
}

#[cfg(test)]
mod tests {
    use super::*;
    use odrl_eval_domain::Oracle;

    #[test]
    fn every_named_profile_resolves() {
        for name in PROFILES {
            assert!(profile_oracle(name).is_ok(), "{name}");
        }
        assert!(profile_oracle("lenient").is_err());
    }

    #[test]
    fn permissive_covers_every_category() {
        let oracle = profile_oracle("permissive").expect("profile");
        for category in Category::ALL {
            assert_eq!(oracle.lookup_default(category), Some(Outcome::Positive));
        }
        assert!(profile_oracle("blank").expect("profile").defaults().is_empty());
    }
}
