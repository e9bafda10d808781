// Copyright (c) 2025 The OpenFunds Core developers
// Licensed under the Apache License, Version 2.0 see LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0 or the MIT license, see
// LICENSE-MIT or http://opensource.org/licenses/MIT

use crate::primitives::TestnetAddress;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A campaign submission as collected from the creation form, before any
/// validation or persistence. Field names follow the persisted record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignDraft {
    pub title: String,
    pub description: String,
    pub btc_address: String,
    pub target_amount: f64,
    pub owner_name: String,
}

/// Required field named by a [`ValidateErr::MissingField`] rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Field {
    Title,
    Description,
    Address,
    Owner,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidateErr {
    /// A required field was submitted empty
    MissingField(Field),

    /// The address does not match the testnet address grammar
    InvalidAddressFormat,

    /// The target amount is not strictly positive
    InvalidAmount,
}

impl fmt::Display for ValidateErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField(Field::Title) => write!(f, "Campaign title is required."),
            Self::MissingField(Field::Description) => {
                write!(f, "Campaign description is required.")
            }
            Self::MissingField(Field::Address) => write!(f, "Bitcoin address is required."),
            Self::MissingField(Field::Owner) => write!(f, "Campaign owner name is required."),
            Self::InvalidAddressFormat => {
                write!(f, "Please enter a valid Bitcoin address format.")
            }
            Self::InvalidAmount => write!(f, "Target amount must be greater than 0."),
        }
    }
}

/// Checks a draft against the submission rules, one rule at a time, and
/// reports the first violation. The order is fixed: it decides which
/// message the user sees when several fields are bad at once.
///
/// Pure and total: no store access, no side effects, an answer for every
/// input. An amount of `NaN` fails the positivity check.
pub fn validate_draft(draft: &CampaignDraft) -> Result<(), ValidateErr> {
    if draft.title.is_empty() {
        return Err(ValidateErr::MissingField(Field::Title));
    }

    if draft.description.is_empty() {
        return Err(ValidateErr::MissingField(Field::Description));
    }

    if draft.btc_address.is_empty() {
        return Err(ValidateErr::MissingField(Field::Address));
    }

    if !TestnetAddress::is_valid(&draft.btc_address) {
        return Err(ValidateErr::InvalidAddressFormat);
    }

    if !(draft.target_amount > 0.0) {
        return Err(ValidateErr::InvalidAmount);
    }

    if draft.owner_name.is_empty() {
        return Err(ValidateErr::MissingField(Field::Owner));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_draft() -> CampaignDraft {
        CampaignDraft {
            title: "Community Garden Restoration Project".to_owned(),
            description: "Our neighborhood garden needs restoration.".to_owned(),
            btc_address: "2N7DoD1edbhWw1Z1rN7HbpvzjPvF9LKjPbE".to_owned(),
            target_amount: 0.5,
            owner_name: "Jane Smith".to_owned(),
        }
    }

    #[test]
    fn valid_draft_passes() {
        assert_eq!(validate_draft(&valid_draft()), Ok(()));
    }

    #[test]
    fn empty_title_is_rejected() {
        let draft = CampaignDraft {
            title: String::new(),
            ..valid_draft()
        };
        assert_eq!(
            validate_draft(&draft),
            Err(ValidateErr::MissingField(Field::Title))
        );
    }

    #[test]
    fn empty_description_is_rejected() {
        let draft = CampaignDraft {
            description: String::new(),
            ..valid_draft()
        };
        assert_eq!(
            validate_draft(&draft),
            Err(ValidateErr::MissingField(Field::Description))
        );
    }

    #[test]
    fn empty_address_is_rejected_before_grammar() {
        let draft = CampaignDraft {
            btc_address: String::new(),
            ..valid_draft()
        };
        assert_eq!(
            validate_draft(&draft),
            Err(ValidateErr::MissingField(Field::Address))
        );
    }

    #[test]
    fn malformed_address_is_rejected() {
        for bad in ["0InvalidAddress", "short1"] {
            let draft = CampaignDraft {
                btc_address: bad.to_owned(),
                ..valid_draft()
            };
            assert_eq!(validate_draft(&draft), Err(ValidateErr::InvalidAddressFormat));
        }
    }

    #[test]
    fn non_positive_amounts_are_rejected() {
        for amount in [0.0, -1.0, f64::NAN] {
            let draft = CampaignDraft {
                target_amount: amount,
                ..valid_draft()
            };
            assert_eq!(validate_draft(&draft), Err(ValidateErr::InvalidAmount));
        }
    }

    #[test]
    fn empty_owner_is_rejected() {
        let draft = CampaignDraft {
            owner_name: String::new(),
            ..valid_draft()
        };
        assert_eq!(
            validate_draft(&draft),
            Err(ValidateErr::MissingField(Field::Owner))
        );
    }

    #[test]
    fn first_violation_wins() {
        // Every field bad at once: the title check fires first.
        let draft = CampaignDraft {
            title: String::new(),
            description: String::new(),
            btc_address: "bogus".to_owned(),
            target_amount: -3.0,
            owner_name: String::new(),
        };
        assert_eq!(
            validate_draft(&draft),
            Err(ValidateErr::MissingField(Field::Title))
        );

        // Bad address and bad amount: the address check fires first.
        let draft = CampaignDraft {
            btc_address: "bogus".to_owned(),
            target_amount: 0.0,
            ..valid_draft()
        };
        assert_eq!(validate_draft(&draft), Err(ValidateErr::InvalidAddressFormat));
    }

    #[test]
    fn rejection_messages_match_the_form() {
        assert_eq!(
            ValidateErr::MissingField(Field::Title).to_string(),
            "Campaign title is required."
        );
        assert_eq!(
            ValidateErr::InvalidAmount.to_string(),
            "Target amount must be greater than 0."
        );
    }
}
