/*
 * Gravity Particle Demo
 *
 * Particles orbit a fixed "black hole" while the mouse pointer drags a
 * repelling particle through them. Trails fade rather than being cleared,
 * which gives the demo its streaky look.
 *
 * Controls: Space pauses, R re-seeds, F toggles the force field overlay,
 * H hides the control panel. Set RUST_LOG to change log verbosity.
 */

use gravity_particles::app::{model, update};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    nannou::app(model).update(update).run();
}
