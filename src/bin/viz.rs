use eframe::egui;
use egui_plot::{Line, Plot, PlotPoints};
use rand::rngs::StdRng;
use rand::SeedableRng;

use uuv_mission::config::RunConfig;
use uuv_mission::mission::{presets, Mission};
use uuv_mission::plant::Submarine;
use uuv_mission::{ClosedLoop, Trajectory};

fn main() -> eframe::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "uuv_mission=info".into()),
        )
        .init();

    let config = RunConfig::default();
    let mission = presets::sine_dive(config.sim.duration);
    let mut closed_loop = ClosedLoop::new(Submarine::new(config.submarine), config.controller.build());
    let mut rng = StdRng::seed_from_u64(config.sim.seed.unwrap_or(0));
    let trajectory = closed_loop
        .simulate_with_random_disturbances(&mission, config.sim.disturbance_std, &mut rng)
        .map_err(|e| eframe::Error::AppCreation(Box::new(e)))?;

    let app = MissionViz { trajectory, mission };
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1200.0, 800.0]),
        ..Default::default()
    };
    eframe::run_native("UUV Mission", options, Box::new(|_| Ok(Box::new(app))))
}

struct MissionViz {
    trajectory: Trajectory,
    mission: Mission,
}

fn series(values: impl Iterator<Item = f64>) -> PlotPoints<'static> {
    values.enumerate().map(|(t, v)| [t as f64, v]).collect()
}

impl eframe::App for MissionViz {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.heading("UUV depth tracking");
            ui.label(format!(
                "Steps: {}  |  RMS error: {:.3}  |  Cave violations: {}",
                self.trajectory.len(),
                self.trajectory.rms_error(&self.mission),
                self.trajectory.cave_violations(&self.mission).len(),
            ));
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let available = ui.available_size();
            let half_h = available.y / 2.0 - 8.0;

            // Depth against reference and cave bounds
            ui.label("Depth");
            Plot::new("depth")
                .height(half_h)
                .x_axis_label("Step")
                .show(ui, |plot_ui| {
                    plot_ui.line(Line::new("Cave height", series(self.mission.cave_height().iter().copied())));
                    plot_ui.line(Line::new("Cave depth", series(self.mission.cave_depth().iter().copied())));
                    plot_ui.line(Line::new("Reference", series(self.mission.reference().iter().copied())));
                    plot_ui.line(Line::new("Depth", series(self.trajectory.depths())));
                });

            // Control action
            ui.label("Control action");
            Plot::new("action")
                .height(half_h)
                .x_axis_label("Step")
                .show(ui, |plot_ui| {
                    plot_ui.line(Line::new("Action", series(self.trajectory.actions.iter().copied())));
                });
        });
    }
}
