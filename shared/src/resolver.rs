//! Factor resolution
//!
//! Merges the factor hierarchy into a single [`FactorSet`] for a location.
//! Resolution is an ordered pipeline of pure stages, each taking the
//! previous set and returning a new one:
//!
//! ```text
//! global -> country override -> state multiplier -> city multiplier
//! ```
//!
//! Unknown countries, states and cities skip their stage. A zero country
//! electricity factor or a zero multiplier counts as unset. Resolution never
//! fails, so it is safe to call concurrently and to cache by location key.

use crate::factors::{CountryFactors, FactorSet, FactorTable, LocationAdjustment, LocationKey};

/// Resolve factors for a location against the builtin table
pub fn resolve_factors(location: &LocationKey) -> FactorSet {
    FactorTable::builtin().resolve(location)
}

impl FactorTable {
    /// Resolve factors for a location against this table
    pub fn resolve(&self, location: &LocationKey) -> FactorSet {
        let factors = self.global.clone();
        let factors = apply_country(factors, self.countries.get(&location.country));
        let factors = apply_adjustment(factors, self.state_adjustment(location));
        let factors = apply_adjustment(factors, self.city_adjustment(location));

        FactorSet {
            location: Some(location.clone()),
            ..factors
        }
    }

    fn state_adjustment(&self, location: &LocationKey) -> Option<&LocationAdjustment> {
        let state = location.state.as_deref()?;
        self.state_adjustments.get(&location.country)?.get(state)
    }

    // City names are a flat lookup, not scoped by country or state.
    fn city_adjustment(&self, location: &LocationKey) -> Option<&LocationAdjustment> {
        let city = location.city.as_deref()?;
        self.city_adjustments.get(city)
    }
}

/// Merge a country's overrides key by key; fields it omits keep their values
fn apply_country(factors: FactorSet, country: Option<&CountryFactors>) -> FactorSet {
    let Some(country) = country else {
        return factors;
    };

    let mut transport = factors.transport;
    transport.extend(country.transport.iter().map(|(k, v)| (k.clone(), *v)));

    let mut diet = factors.diet;
    diet.extend(country.diet.iter().map(|(k, v)| (k.clone(), *v)));

    FactorSet {
        transport,
        electricity: nonzero(country.electricity).unwrap_or(factors.electricity),
        diet,
        location: factors.location,
    }
}

/// Scale electricity and every transport mode. Diet is never adjusted here.
fn apply_adjustment(factors: FactorSet, adjustment: Option<&LocationAdjustment>) -> FactorSet {
    let Some(adjustment) = adjustment else {
        return factors;
    };

    let electricity_multiplier = nonzero(adjustment.electricity).unwrap_or(1.0);
    let transport_multiplier = nonzero(adjustment.transport).unwrap_or(1.0);

    FactorSet {
        transport: factors
            .transport
            .into_iter()
            .map(|(mode, factor)| (mode, factor * transport_multiplier))
            .collect(),
        electricity: factors.electricity * electricity_multiplier,
        diet: factors.diet,
        location: factors.location,
    }
}

fn nonzero(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0)
}
