//! A small constraint layer over [`varisat`].
//!
//! Integers are direct (one-hot) encoded: a variable with domain `0..=max` owns one literal per value, exactly one of
//! which is true. Boolean combinators introduce Tseitin gate literals. A [`Session`] is one query; dropping it
//! releases the underlying solver.

use std::ops::Index;

use itertools::Itertools;
use tracing::{debug, trace};
use varisat::{ExtendFormula, Lit, Solver};

use crate::error::{Error, Result};

pub(crate) fn exactly_one(vars: Vec<Lit>) -> Vec<Vec<Lit>> {
    let mut clauses = Vec::with_capacity(vars.len() * (vars.len() + 1) / 2 + 1);

    // no two are true; (!A + !B) * (!A + !C) * ...
    clauses.extend(vars.iter()
        .combinations(2)
        .map(|pair| vec![!**pair.index(0), !**pair.index(1)])
    );
    // at least one var is true; A + B + C + ...
    clauses.push(vars);

    clauses
}

/// An integer variable with domain `0..=max`, one literal per value.
#[derive(Clone, Debug)]
pub(crate) struct IntVar {
    values: Vec<Lit>,
}

impl IntVar {
    /// The literal stating this variable takes `value`.
    ///
    /// Values outside the domain are never taken, so for them this is [`None`].
    pub(crate) fn equals(&self, value: usize) -> Option<Lit> {
        self.values.get(value).copied()
    }

    pub(crate) fn max(&self) -> usize {
        self.values.len() - 1
    }

    /// The same variable viewed as a sum term.
    pub(crate) fn term(&self) -> Term {
        Term { levels: self.values[1..].to_vec() }
    }
}

/// A small non-negative integer expression for [`Session::sum_equals`].
///
/// `levels[k - 1]` is the (mutually exclusive) literal for the value `k`; the term is 0 when none of them hold.
/// This covers both plain integer variables and `if piece = p then w else 0` style contributions.
#[derive(Clone, Debug, Default)]
pub(crate) struct Term {
    levels: Vec<Lit>,
}

impl Term {
    pub(crate) fn new(levels: Vec<Lit>) -> Self {
        Self { levels }
    }

    fn max(&self) -> usize {
        self.levels.len()
    }

    /// Literals of a clause which is satisfied exactly when this term is not `value`.
    fn differs_from(&self, value: usize) -> Vec<Lit> {
        match value {
            0 => self.levels.clone(),
            k => vec![!self.levels[k - 1]],
        }
    }
}

/// One satisfiability query.
pub(crate) struct Session {
    solver: Solver<'static>,
    true_lit: Lit,
    clauses: usize,
    variables: usize,
    model: Option<Vec<bool>>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub(crate) fn new() -> Self {
        let mut solver = Solver::new();
        let true_lit = solver.new_lit();
        solver.add_clause(&[true_lit]);

        Self {
            solver,
            true_lit,
            clauses: 1,
            variables: 1,
            model: None,
        }
    }

    #[inline]
    pub(crate) fn constant(&self, value: bool) -> Lit {
        if value { self.true_lit } else { !self.true_lit }
    }

    pub(crate) fn declare_bool(&mut self, name: impl AsRef<str>) -> Lit {
        let lit = self.fresh();
        trace!(name = name.as_ref(), var = lit.var().index(), "declared bool");
        lit
    }

    pub(crate) fn declare_int(&mut self, name: impl AsRef<str>, max: usize) -> IntVar {
        let values = (0..=max).map(|_| self.fresh()).collect_vec();
        trace!(name = name.as_ref(), first = values[0].var().index(), max, "declared int");
        for clause in exactly_one(values.clone()) {
            self.add_clause(&clause);
        }
        IntVar { values }
    }

    fn fresh(&mut self) -> Lit {
        self.variables += 1;
        self.solver.new_lit()
    }

    pub(crate) fn add_clause(&mut self, clause: &[Lit]) {
        self.clauses += 1;
        self.solver.add_clause(clause);
    }

    /// Assert that `lit` holds.
    pub(crate) fn assert(&mut self, lit: Lit) {
        self.add_clause(&[lit]);
    }

    pub(crate) fn implies(&mut self, premise: Lit, conclusion: Lit) {
        self.add_clause(&[!premise, conclusion]);
    }

    /// Assert `a <=> b`.
    pub(crate) fn iff(&mut self, a: Lit, b: Lit) {
        self.add_clause(&[!a, b]);
        self.add_clause(&[a, !b]);
    }

    /// A literal equivalent to the conjunction of `lits`. The empty conjunction is true.
    pub(crate) fn and(&mut self, lits: &[Lit]) -> Lit {
        match lits {
            [] => self.constant(true),
            [only] => *only,
            _ => {
                let gate = self.fresh();
                // G => L_i for each i, and (L_1 * L_2 * ...) => G
                for lit in lits {
                    self.add_clause(&[!gate, *lit]);
                }
                let mut back = lits.iter().map(|lit| !*lit).collect_vec();
                back.push(gate);
                self.add_clause(&back);
                gate
            }
        }
    }

    /// A literal equivalent to the disjunction of `lits`. The empty disjunction is false.
    pub(crate) fn or(&mut self, lits: &[Lit]) -> Lit {
        match lits {
            [] => self.constant(false),
            [only] => *only,
            _ => !self.and(&lits.iter().map(|lit| !*lit).collect_vec()),
        }
    }

    /// Assert `sum(terms) == target`.
    ///
    /// Every combination of term values with the wrong sum is forbidden outright, which is cheap for the handful of
    /// terms around a single island.
    pub(crate) fn sum_equals(&mut self, terms: &[Term], target: usize) {
        if terms.is_empty() {
            if target != 0 {
                self.add_clause(&[]);
            }
            return;
        }

        let combinations = terms.iter()
            .map(|term| 0..=term.max())
            .multi_cartesian_product()
            .filter(|values| values.iter().sum::<usize>() != target)
            .collect_vec();

        for values in combinations {
            let clause = terms.iter()
                .zip(&values)
                .flat_map(|(term, value)| term.differs_from(*value))
                .collect_vec();
            self.add_clause(&clause);
        }
    }

    /// Run the solver. `Ok(false)` means the constraints are unsatisfiable.
    pub(crate) fn check(&mut self) -> Result<bool> {
        let satisfiable = self.solver.solve().map_err(|err| Error::Solver(format!("{err:?}")))?;
        debug!(variables = self.variables, clauses = self.clauses, satisfiable, "checked session");

        self.model = if satisfiable {
            let model = self.solver.model()
                .ok_or_else(|| Error::Solver("satisfiable but no model available".to_owned()))?;
            let mut values = vec![false; self.variables + 1];
            for lit in model {
                if let Some(slot) = values.get_mut(lit.var().index()) {
                    *slot = lit.is_positive();
                }
            }
            Some(values)
        } else {
            None
        };

        Ok(satisfiable)
    }

    /// The value of `lit` in the last model. Everything is false before a satisfiable [`Self::check`].
    pub(crate) fn value(&self, lit: Lit) -> bool {
        self.model.as_ref()
            .and_then(|model| model.get(lit.var().index()))
            .is_some_and(|value| *value == lit.is_positive())
    }

    /// The value of `var` in the last model, if one exists.
    pub(crate) fn int_value(&self, var: &IntVar) -> Option<usize> {
        self.model.as_ref()?;
        (0..=var.max()).find(|value| var.equals(*value).is_some_and(|lit| self.value(lit)))
    }
}
