//! Integration test: consumer-kernel scenarios.
//!
//! Two fixture kernels drive the registry end-to-end the way real
//! physics kernels do: a coupled switching time-derivative kernel with
//! parallel free-energy / switching-function property lists, and a
//! Lagrange-multiplier constraint kernel with one switching function
//! per order parameter. Construction fetches base and derivative
//! properties (missing declarations silently become zero), setup runs
//! the coupling validation, and the per-sample-point math only
//! dereferences handles.

use std::collections::HashMap;
use std::sync::Arc;

use approx::assert_relative_eq;
use tangent_core::{ConfigError, PropertyHandle, Real, VariableName};
use tangent_registry::{DerivativeRegistry, HostBinding, Problem};
use tangent_test_utils::{ProblemBuilder, TabulatedMaterial};

fn var(name: &str) -> VariableName {
    VariableName::from(name)
}

// ── Coupled switching time-derivative kernel ───────────────────────

/// Multiplies a time derivative by `sum_j dh_j/dv * F_j`, with full
/// Jacobian information fetched at construction.
struct CoupledSwitchingTimeDerivative {
    registry: DerivativeRegistry,
    f_names: Vec<String>,
    h_names: Vec<String>,
    prop_f: Vec<PropertyHandle<Real>>,
    prop_df_dv: Vec<PropertyHandle<Real>>,
    prop_df_darg: Vec<Vec<PropertyHandle<Real>>>,
    prop_dh_dv: Vec<PropertyHandle<Real>>,
    prop_d2h_dv2: Vec<PropertyHandle<Real>>,
    prop_d2h_dvdarg: Vec<Vec<PropertyHandle<Real>>>,
}

impl std::fmt::Debug for CoupledSwitchingTimeDerivative {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoupledSwitchingTimeDerivative")
            .finish_non_exhaustive()
    }
}

impl CoupledSwitchingTimeDerivative {
    fn new(
        problem: Arc<Problem>,
        name: &str,
        own_variable: &str,
        coupled: &[&str],
        f_names: &[&str],
        h_names: &[&str],
    ) -> Result<Self, ConfigError> {
        if f_names.len() != h_names.len() {
            return Err(ConfigError::MismatchedListLengths {
                object: name.to_string(),
                first: "f_names".to_string(),
                first_len: f_names.len(),
                second: "h_names".to_string(),
                second_len: h_names.len(),
            });
        }

        let host =
            HostBinding::kernel(name, own_variable).with_coupled(coupled.iter().copied());
        let registry = DerivativeRegistry::new(problem, host);
        let v = var(own_variable);
        let args: Vec<VariableName> = coupled.iter().copied().map(var).collect();

        let mut prop_f = Vec::new();
        let mut prop_df_dv = Vec::new();
        let mut prop_df_darg = Vec::new();
        let mut prop_dh_dv = Vec::new();
        let mut prop_d2h_dv2 = Vec::new();
        let mut prop_d2h_dvdarg = Vec::new();

        for (f, h) in f_names.iter().zip(h_names) {
            prop_f.push(registry.base_property::<Real>(f));
            prop_df_dv.push(registry.derivative::<Real>(f, &[v.clone()]));
            prop_dh_dv.push(registry.derivative::<Real>(h, &[v.clone()]));
            prop_d2h_dv2.push(registry.derivative::<Real>(h, &[v.clone(), v.clone()]));

            prop_df_darg.push(
                args.iter()
                    .map(|arg| registry.derivative::<Real>(f, &[arg.clone()]))
                    .collect(),
            );
            prop_d2h_dvdarg.push(
                args.iter()
                    .map(|arg| registry.derivative::<Real>(h, &[v.clone(), arg.clone()]))
                    .collect(),
            );
        }

        Ok(Self {
            registry,
            f_names: f_names.iter().map(ToString::to_string).collect(),
            h_names: h_names.iter().map(ToString::to_string).collect(),
            prop_f,
            prop_df_dv,
            prop_df_darg,
            prop_dh_dv,
            prop_d2h_dv2,
            prop_d2h_dvdarg,
        })
    }

    /// One-time setup: validate coupling completeness for every
    /// consumed property against the primary system.
    fn initial_setup(&self) -> Vec<VariableName> {
        let mut missing = Vec::new();
        for name in self.f_names.iter().chain(&self.h_names) {
            for v in self.registry.validate_nonlinear_coupling::<Real>(name, &[]) {
                if !missing.contains(&v) {
                    missing.push(v);
                }
            }
        }
        missing
    }

    /// `sum_j dh_j/dv * F_j` at a sample point (the residual factor).
    fn residual_factor(&self, qp: usize) -> Real {
        self.prop_dh_dv
            .iter()
            .zip(&self.prop_f)
            .map(|(dh, f)| dh.read()[qp] * f.read()[qp])
            .sum()
    }

    /// `sum_j dh_j/dv * dF_j/dv` at a sample point (diagonal factor).
    fn jacobian_factor(&self, qp: usize) -> Real {
        self.prop_dh_dv
            .iter()
            .zip(&self.prop_df_dv)
            .map(|(dh, df)| dh.read()[qp] * df.read()[qp])
            .sum()
    }

    /// `sum_j d2h_j/dvdarg * F_j + dh_j/dv * dF_j/darg` (off-diagonal
    /// factor for coupled argument `arg_index`).
    fn off_diag_factor(&self, arg_index: usize, qp: usize) -> Real {
        (0..self.prop_f.len())
            .map(|j| {
                self.prop_d2h_dvdarg[j][arg_index].read()[qp] * self.prop_f[j].read()[qp]
                    + self.prop_dh_dv[j].read()[qp]
                        * self.prop_df_darg[j][arg_index].read()[qp]
            })
            .sum()
    }
}

/// Producer covering part of the derivative matrix; everything it
/// skips must come back as exact zero.
fn switching_producer(problem: &Arc<Problem>) -> TabulatedMaterial {
    let mut mat = TabulatedMaterial::new(Arc::clone(problem), "switching_mat");

    mat.declare_base("F0", |qp| 1.0 + qp as Real).unwrap();
    mat.declare_base("F1", |_| 2.0).unwrap();
    mat.declare_base("h0", |_| 0.25).unwrap();
    mat.declare_base("h1", |_| 0.75).unwrap();

    mat.declare_derivative("F0", &[var("v")], |_| 0.5).unwrap();
    mat.declare_derivative("F1", &[var("v")], |_| -1.0).unwrap();
    mat.declare_derivative("h0", &[var("v")], |_| 3.0).unwrap();
    mat.declare_derivative("h1", &[var("v")], |_| -3.0).unwrap();
    mat.declare_derivative("h0", &[var("v"), var("v")], |_| 0.125)
        .unwrap();
    // d2h1/dv2 left undeclared: must resolve to zero.

    // w-derivatives: only F0 and h0 carry them.
    mat.declare_derivative("F0", &[var("w")], |_| 4.0).unwrap();
    mat.declare_derivative("h0", &[var("v"), var("w")], |_| -0.5)
        .unwrap();

    mat
}

#[test]
fn mismatched_parallel_lists_fail_construction() {
    let problem = ProblemBuilder::new().with_variables(["v", "w"]).build();
    let err = CoupledSwitchingTimeDerivative::new(
        problem,
        "ctd",
        "v",
        &["w"],
        &["F0", "F1"],
        &["h0"],
    )
    .unwrap_err();

    assert_eq!(
        err,
        ConfigError::MismatchedListLengths {
            object: "ctd".to_string(),
            first: "f_names".to_string(),
            first_len: 2,
            second: "h_names".to_string(),
            second_len: 1,
        }
    );
}

#[test]
fn end_to_end_switching_scenario() {
    let problem = ProblemBuilder::new()
        .with_variables(["v", "w", "b"])
        .with_max_sample_points(2)
        .build();
    let producer = switching_producer(&problem);

    let kernel = CoupledSwitchingTimeDerivative::new(
        Arc::clone(&problem),
        "ctd",
        "v",
        &["w"],
        &["F0", "F1"],
        &["h0", "h1"],
    )
    .unwrap();

    // The kernel's own variable and its coupled argument are covered:
    // nothing to report.
    assert!(kernel.initial_setup().is_empty());

    // Assembly sweep: the producer fills, the kernel only dereferences.
    producer.compute_element(2);

    // residual factor: dh0/dv * F0 + dh1/dv * F1
    //   qp 0: 3.0 * 1.0 + (-3.0) * 2.0 = -3.0
    //   qp 1: 3.0 * 2.0 + (-3.0) * 2.0 =  0.0
    assert_eq!(kernel.residual_factor(0), -3.0);
    assert_eq!(kernel.residual_factor(1), 0.0);

    // diagonal factor: dh0/dv * dF0/dv + dh1/dv * dF1/dv
    //   qp 0: 3.0 * 0.5 + (-3.0) * (-1.0) = 4.5
    assert_eq!(kernel.jacobian_factor(0), 4.5);

    // off-diagonal wrt w: d2h0/dvdw * F0 + dh0/dv * dF0/dw
    //                   + d2h1/dvdw * F1 + dh1/dv * dF1/dw
    // undeclared d2h1/dvdw and dF1/dw are exact zeros:
    //   qp 0: (-0.5) * 1.0 + 3.0 * 4.0 + 0.0 + 0.0 = 11.5
    assert_eq!(kernel.off_diag_factor(0, 0), 11.5);

    // Undeclared second derivative resolved to a zero property of full
    // sample-point size, not an error.
    let d2h1 = &kernel.prop_d2h_dv2[1];
    assert_eq!(d2h1.read().len(), 2);
    assert!(d2h1.read().values().iter().all(|&x| x == 0.0));
}

#[test]
fn uncoupled_argument_with_declared_derivative_is_reported() {
    let problem = ProblemBuilder::new()
        .with_variables(["v", "w", "b"])
        .with_max_sample_points(2)
        .build();
    let _producer = switching_producer(&problem);

    // Same kernel, but the analyst forgot to couple w.
    let kernel = CoupledSwitchingTimeDerivative::new(
        Arc::clone(&problem),
        "ctd_forgetful",
        "v",
        &[],
        &["F0", "F1"],
        &["h0", "h1"],
    )
    .unwrap();

    // dF0/dw and d2h0/dvdw exist in storage, so w is relevant and
    // undeclared. v is the kernel's own variable and b has no declared
    // derivative; neither may be reported.
    assert_eq!(kernel.initial_setup(), vec![var("w")]);
}

// ── Switching-function constraint kernel ───────────────────────────

/// Lagrange-multiplier kernel constraining `sum_i h_i = 1`, with one
/// switching function and one order parameter per phase.
struct SwitchingFunctionConstraintLagrange {
    registry: DerivativeRegistry,
    h_names: Vec<String>,
    prop_h: Vec<PropertyHandle<Real>>,
    prop_dh: Vec<PropertyHandle<Real>>,
    eta_index: HashMap<VariableName, usize>,
}

impl std::fmt::Debug for SwitchingFunctionConstraintLagrange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwitchingFunctionConstraintLagrange")
            .finish_non_exhaustive()
    }
}

impl SwitchingFunctionConstraintLagrange {
    fn new(
        problem: Arc<Problem>,
        name: &str,
        own_variable: &str,
        h_names: &[&str],
        etas: &[&str],
    ) -> Result<Self, ConfigError> {
        if h_names.len() != etas.len() {
            return Err(ConfigError::MismatchedListLengths {
                object: name.to_string(),
                first: "h_names".to_string(),
                first_len: h_names.len(),
                second: "etas".to_string(),
                second_len: etas.len(),
            });
        }

        let host = HostBinding::kernel(name, own_variable).with_coupled(etas.iter().copied());
        let registry = DerivativeRegistry::new(problem, host);

        let mut prop_h = Vec::new();
        let mut prop_dh = Vec::new();
        let mut eta_index = HashMap::new();
        for (i, (h, eta)) in h_names.iter().zip(etas).enumerate() {
            prop_h.push(registry.base_property::<Real>(h));
            prop_dh.push(registry.derivative::<Real>(h, &[var(eta)]));
            eta_index.insert(var(eta), i);
        }

        Ok(Self {
            registry,
            h_names: h_names.iter().map(ToString::to_string).collect(),
            prop_h,
            prop_dh,
            eta_index,
        })
    }

    fn initial_setup(&self) -> Vec<VariableName> {
        let mut missing = Vec::new();
        for name in &self.h_names {
            for v in self.registry.validate_nonlinear_coupling::<Real>(name, &[]) {
                if !missing.contains(&v) {
                    missing.push(v);
                }
            }
        }
        missing
    }

    /// `sum_i h_i - 1` at a sample point.
    fn residual(&self, qp: usize) -> Real {
        self.prop_h.iter().map(|h| h.read()[qp]).sum::<Real>() - 1.0
    }

    /// Off-diagonal Jacobian entry for `jvar`: `dh_i/deta_i` when
    /// `jvar` is the i-th order parameter, zero otherwise.
    fn off_diag_jacobian(&self, jvar: &VariableName, qp: usize) -> Real {
        match self.eta_index.get(jvar) {
            Some(&i) => self.prop_dh[i].read()[qp],
            None => 0.0,
        }
    }
}

#[test]
fn constraint_kernel_assembles_from_per_eta_derivatives() {
    let problem = ProblemBuilder::new()
        .with_variables(["lambda", "eta0", "eta1"])
        .with_max_sample_points(2)
        .build();

    let mut mat = TabulatedMaterial::new(Arc::clone(&problem), "switching_mat");
    mat.declare_base("h0", |_| 0.3).unwrap();
    mat.declare_base("h1", |_| 0.3).unwrap();
    mat.declare_derivative("h0", &[var("eta0")], |_| 1.5).unwrap();
    mat.declare_derivative("h1", &[var("eta1")], |_| -1.5).unwrap();

    let kernel = SwitchingFunctionConstraintLagrange::new(
        Arc::clone(&problem),
        "constraint",
        "lambda",
        &["h0", "h1"],
        &["eta0", "eta1"],
    )
    .unwrap();

    assert!(kernel.initial_setup().is_empty());

    mat.compute_element(2);

    // residual: 0.3 + 0.3 - 1.0
    assert_relative_eq!(kernel.residual(0), -0.4, max_relative = 1e-12);

    assert_eq!(kernel.off_diag_jacobian(&var("eta0"), 0), 1.5);
    assert_eq!(kernel.off_diag_jacobian(&var("eta1"), 1), -1.5);
    assert_eq!(kernel.off_diag_jacobian(&var("lambda"), 0), 0.0);
}

#[test]
fn constraint_kernel_rejects_mismatched_eta_list() {
    let problem = ProblemBuilder::new()
        .with_variables(["lambda", "eta0"])
        .build();
    let err = SwitchingFunctionConstraintLagrange::new(
        problem,
        "constraint",
        "lambda",
        &["h0", "h1"],
        &["eta0"],
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::MismatchedListLengths { .. }));
}
