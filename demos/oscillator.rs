use std::{ env, io };
use nmethods::ode::{ Euler, EulerConfig, Rhs, Stepper };

mod export;

// damped, driven harmonic oscillator y'' = -ω² y - γ y' + F cos(Ω x),
// integrated with forward Euler; the trajectory is written to stdout as
// two-column CSV
//
// usage: oscillator [step]

const OMEGA: f64 = 2.0;
const GAMMA: f64 = 0.3;
const DRIVE: f64 = 0.5;
const DRIVE_FREQ: f64 = 1.5;

fn main() -> anyhow::Result<()> {
    let step: f64
        = env::args().nth(1).as_deref().unwrap_or("0.001").parse()?;

    let rhs = Rhs::second(|x, y, dy| {
        -OMEGA.powi(2) * y - GAMMA * dy + DRIVE * (DRIVE_FREQ * x).cos()
    });
    let euler = Euler::for_shape(2, 1, rhs)?;
    let config
        = EulerConfig::new(0.0, 1.0, 30.0)
        .extra(0.0)
        .step(step)
        .bounded(1e6);
    let run = euler.configure(&config)?;
    eprintln!("{} steps of {:.3e}", run.len() - 1, run.step());
    let traj = run.predict()?;

    let k = traj.len() - 1;
    eprintln!("y({:.3}) = {:.6}", traj.x()[k], traj.y()[k]);
    if let Some(dy) = traj.extra() {
        eprintln!("y'({:.3}) = {:.6}", traj.x()[k], dy[k]);
    }

    export::write_columns(io::stdout().lock(), traj.columns())
}
