use std::{ env, io };
use ndarray as nd;
use nmethods::{
    quad,
    spline::{ Interpolator, Spline, SplineForm },
};

mod export;

// interpolate a coarsely sampled damped sine and write the dense curve to
// stdout as two-column CSV
//
// usage: spline_knots [usual|symmetric] [step]

fn main() -> anyhow::Result<()> {
    let mut args = env::args().skip(1);
    let form: SplineForm
        = args.next().as_deref().unwrap_or("usual").parse()?;
    let step: f64
        = args.next().as_deref().unwrap_or("0.01").parse()?;

    let f = |x: f64| (-0.2 * x).exp() * (2.0 * x).sin();
    let x: nd::Array1<f64>
        = nd::array![0.0, 0.4, 0.9, 1.3, 2.0, 2.6, 3.1, 3.9, 4.4, 5.0, 6.0];
    let y = x.mapv(f);

    let spline = Spline::fit(form, &x, &y)?;
    let (xc, yc) = spline.predict(step)?;

    let err_max
        = xc.iter()
        .map(|xk| (spline.value(*xk) - f(*xk)).abs())
        .fold(0.0, f64::max);
    let area_knots = quad::integrate_samples(&y, Some(&x), None)?;
    let area_dense = quad::integrate_samples(&yc, Some(&xc), None)?;
    let area_exact = quad::integrate_adaptive(f, x[0], x[x.len() - 1], 1e-10)?;
    eprintln!("form: {}; {} knots -> {} points", form, x.len(), xc.len());
    eprintln!("max interpolation error: {:.3e}", err_max);
    eprintln!(
        "area: knots {:.6}, spline {:.6}, adaptive {:.6} ({} subintervals)",
        area_knots, area_dense, area_exact.refined, area_exact.n,
    );

    export::write_columns(
        io::stdout().lock(),
        xc.iter().copied().zip(yc.iter().copied()),
    )
}
