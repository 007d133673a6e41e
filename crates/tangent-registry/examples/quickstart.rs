//! Minimal end-to-end walkthrough: a producer declares a free energy
//! and part of its derivative matrix, a kernel fetches everything it
//! needs (missing pieces come back as exact zeros), and the setup-time
//! coupling check warns about a forgotten argument.
//!
//! Run with `cargo run --example quickstart -p tangent-registry`.

use std::sync::Arc;

use tangent_core::{Real, VariableName, VariableSystem};
use tangent_registry::{DerivativeRegistry, HostBinding, Problem};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let problem = Arc::new(Problem::new(
        VariableSystem::from_variables(["c", "eta"]),
        VariableSystem::empty(),
        4,
    ));

    // Producer side: declare F, dF/dc, and dF/deta; fill one element.
    let eos = DerivativeRegistry::new(Arc::clone(&problem), HostBinding::material("eos"));
    let f = eos.declare_property::<Real>("F").unwrap();
    let dfdc = eos
        .declare_derivative::<Real>("F", &[VariableName::from("c")])
        .unwrap();
    let dfdeta = eos
        .declare_derivative::<Real>("F", &[VariableName::from("eta")])
        .unwrap();
    for (handle, value) in [(&f, 1.0), (&dfdc, 0.5), (&dfdeta, -0.25)] {
        let mut p = handle.write();
        p.resize_zeroed(4);
        for qp in 0..4 {
            p.set(qp, value + qp as Real);
        }
    }

    // Consumer side: a kernel for `c` that forgot to couple `eta`.
    let kernel = DerivativeRegistry::new(
        Arc::clone(&problem),
        HostBinding::kernel("diffusion", "c"),
    );
    let prop_f = kernel.base_property::<Real>("F");
    let prop_dfdc = kernel.derivative::<Real>("F", &[VariableName::from("c")]);
    let prop_d2fdc2 =
        kernel.derivative::<Real>("F", &[VariableName::from("c"), VariableName::from("c")]);

    println!("F[2]        = {}", prop_f.read()[2]);
    println!("dF/dc[2]    = {}", prop_dfdc.read()[2]);
    println!("d2F/dc2[2]  = {} (never declared, exact zero)", prop_d2fdc2.read()[2]);

    // Emits a warning listing `eta`: its derivative exists but the
    // kernel never coupled it.
    let missing = kernel.validate_coupling::<Real>("F", &[]);
    println!("missing coupled variables: {missing:?}");
}
