//! Best-contract selection under a delta constraint.

use rust_decimal::Decimal;

use crate::types::{OptionContract, OptionType, ScanRequest};

/// Criteria a contract must satisfy to be a candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct ContractFilter {
    /// Expiration as `YYYY-MM-DD`, compared verbatim.
    pub expiration: String,
    pub option_type: OptionType,
    /// Upper bound on delta (inclusive).
    pub delta_target: f64,
}

impl ContractFilter {
    #[must_use]
    pub fn from_request(request: &ScanRequest) -> Self {
        Self {
            expiration: request.expiration_key(),
            option_type: request.option_type,
            delta_target: request.delta_target,
        }
    }

    /// Returns the contract as a candidate if it passes every criterion.
    #[must_use]
    pub fn accepts<'a>(&self, contract: &'a OptionContract) -> Option<Candidate<'a>> {
        if contract.expiration != self.expiration || contract.option_type != self.option_type {
            return None;
        }
        // NaN never compares <=, so it is rejected here as well.
        let delta = contract.delta.filter(|d| *d <= self.delta_target)?;
        Some(Candidate {
            contract,
            delta,
            bid: contract.bid?,
            ask: contract.ask?,
        })
    }
}

/// A contract that passed the filter, with its quote fields present.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate<'a> {
    pub contract: &'a OptionContract,
    pub delta: f64,
    pub bid: Decimal,
    pub ask: Decimal,
}

/// Picks the candidate with the highest delta.
///
/// Every candidate is at or beyond the target, so the highest delta is the one
/// closest to it. Ties keep the earliest contract in input order.
#[must_use]
pub fn select_best<'a>(
    contracts: &'a [OptionContract],
    filter: &ContractFilter,
) -> Option<Candidate<'a>> {
    contracts
        .iter()
        .filter_map(|c| filter.accepts(c))
        .fold(None::<Candidate<'a>>, |best, candidate| match best {
            Some(b) if b.delta >= candidate.delta => best,
            _ => Some(candidate),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn contract(
        expiration: &str,
        option_type: OptionType,
        delta: Option<f64>,
        bid: Option<Decimal>,
        ask: Option<Decimal>,
        strike: Decimal,
    ) -> OptionContract {
        OptionContract {
            expiration: expiration.to_string(),
            option_type,
            delta,
            bid,
            ask,
            strike,
        }
    }

    fn put(delta: f64, strike: Decimal) -> OptionContract {
        contract(
            "2025-08-15",
            OptionType::Put,
            Some(delta),
            Some(dec!(1.00)),
            Some(dec!(1.10)),
            strike,
        )
    }

    fn filter(target: f64) -> ContractFilter {
        ContractFilter {
            expiration: "2025-08-15".to_string(),
            option_type: OptionType::Put,
            delta_target: target,
        }
    }

    #[test]
    fn test_selects_only_qualifying_delta() {
        let contracts = vec![
            contract(
                "2025-08-15",
                OptionType::Put,
                Some(-0.18),
                Some(dec!(1.00)),
                Some(dec!(1.20)),
                dec!(100),
            ),
            contract(
                "2025-08-15",
                OptionType::Put,
                Some(-0.25),
                Some(dec!(0.80)),
                Some(dec!(1.00)),
                dec!(95),
            ),
        ];
        let best = select_best(&contracts, &filter(-0.20)).unwrap();
        assert_eq!(best.contract.strike, dec!(95));
    }

    #[test]
    fn test_selects_maximum_delta_among_candidates() {
        let contracts = vec![put(-0.40, dec!(80)), put(-0.22, dec!(92)), put(-0.31, dec!(88))];
        let best = select_best(&contracts, &filter(-0.20)).unwrap();
        assert_eq!(best.contract.strike, dec!(92));
    }

    #[test]
    fn test_delta_equal_to_target_qualifies() {
        let contracts = vec![put(-0.20, dec!(97)), put(-0.35, dec!(90))];
        let best = select_best(&contracts, &filter(-0.20)).unwrap();
        assert_eq!(best.contract.strike, dec!(97));
    }

    #[test]
    fn test_tie_keeps_first_in_order() {
        let contracts = vec![put(-0.25, dec!(94)), put(-0.25, dec!(93))];
        let best = select_best(&contracts, &filter(-0.20)).unwrap();
        assert_eq!(best.contract.strike, dec!(94));
    }

    #[test]
    fn test_rejects_wrong_expiration_and_type() {
        let contracts = vec![
            contract(
                "2025-08-22",
                OptionType::Put,
                Some(-0.25),
                Some(dec!(1)),
                Some(dec!(1.1)),
                dec!(90),
            ),
            contract(
                "2025-08-15",
                OptionType::Call,
                Some(-0.25),
                Some(dec!(1)),
                Some(dec!(1.1)),
                dec!(91),
            ),
        ];
        assert!(select_best(&contracts, &filter(-0.20)).is_none());
    }

    #[test]
    fn test_expiration_is_string_exact() {
        let contracts = vec![contract(
            "2025-8-15",
            OptionType::Put,
            Some(-0.25),
            Some(dec!(1)),
            Some(dec!(1.1)),
            dec!(90),
        )];
        assert!(select_best(&contracts, &filter(-0.20)).is_none());
    }

    #[test]
    fn test_rejects_missing_delta_bid_or_ask() {
        let contracts = vec![
            contract("2025-08-15", OptionType::Put, None, Some(dec!(1)), Some(dec!(1.1)), dec!(90)),
            contract("2025-08-15", OptionType::Put, Some(-0.3), None, Some(dec!(1.1)), dec!(91)),
            contract("2025-08-15", OptionType::Put, Some(-0.3), Some(dec!(1)), None, dec!(92)),
            contract("2025-08-15", OptionType::Put, Some(f64::NAN), Some(dec!(1)), Some(dec!(1.1)), dec!(93)),
        ];
        assert!(select_best(&contracts, &filter(-0.20)).is_none());
    }

    #[test]
    fn test_empty_chain() {
        assert!(select_best(&[], &filter(-0.20)).is_none());
    }

    #[test]
    fn test_call_side_selection() {
        let f = ContractFilter {
            expiration: "2025-08-15".to_string(),
            option_type: OptionType::Call,
            delta_target: 0.30,
        };
        let contracts = vec![
            contract("2025-08-15", OptionType::Call, Some(0.45), Some(dec!(2)), Some(dec!(2.2)), dec!(100)),
            contract("2025-08-15", OptionType::Call, Some(0.28), Some(dec!(1)), Some(dec!(1.1)), dec!(105)),
            contract("2025-08-15", OptionType::Call, Some(0.15), Some(dec!(0.5)), Some(dec!(0.6)), dec!(110)),
        ];
        // literal rule: max delta among deltas <= target
        let best = select_best(&contracts, &f).unwrap();
        assert_eq!(best.contract.strike, dec!(105));
    }

    #[test]
    fn test_deterministic() {
        let contracts = vec![put(-0.40, dec!(80)), put(-0.22, dec!(92)), put(-0.31, dec!(88))];
        let a = select_best(&contracts, &filter(-0.20));
        let b = select_best(&contracts, &filter(-0.20));
        assert_eq!(a, b);
    }

    #[test]
    fn test_candidate_carries_quote_fields() {
        let contracts = vec![contract(
            "2025-08-15",
            OptionType::Put,
            Some(-0.26),
            Some(dec!(1.00)),
            Some(dec!(0.81)),
            dec!(160),
        )];
        let best = select_best(&contracts, &filter(-0.20)).unwrap();
        assert_eq!(best.delta, -0.26);
        assert_eq!(best.bid, dec!(1.00));
        assert_eq!(best.ask, dec!(0.81));
        assert!(std::ptr::eq(best.contract, &contracts[0]));
    }
}
