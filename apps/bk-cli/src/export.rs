//! CSV rendering of co-indexed result series.

use bk_control::BodePlot;
use bk_sim::SimulationResults;

pub fn simulation_csv(results: &SimulationResults) -> String {
    let mut csv = String::from(
        "time_s,inductor_current_a,output_voltage_v,switch_voltage_v,diode_voltage_v,switch_current_a,diode_current_a\n",
    );
    for s in results.samples() {
        csv.push_str(&format!(
            "{},{},{},{},{},{},{}\n",
            s.time,
            s.inductor_current,
            s.output_voltage,
            s.switch_voltage,
            s.diode_voltage,
            s.switch_current,
            s.diode_current
        ));
    }
    csv
}

pub fn bode_csv(plot: &BodePlot) -> String {
    let mut csv = String::from("frequency_hz,magnitude_db,phase_deg\n");
    for ((f, m), p) in plot
        .frequencies_hz
        .iter()
        .zip(&plot.magnitude_db)
        .zip(&plot.phase_deg)
    {
        csv.push_str(&format!("{},{},{}\n", f, m, p));
    }
    csv
}
