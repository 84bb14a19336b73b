use glam::Vec2;
use stomp::*;

fn main() {
    let cfg = Tuning::default();

    let level = RectSet::from_sketch(
        Vec2::new(0.0, 0.0),
        64.0,
        &[
            "............",
            "........G...",
            "......----..",
            "............",
            "...##.......",
            "############",
        ],
    );
    let mut crates = BreakableTiles::new(Vec2::new(0.0, 0.0), 64.0);
    crates.fill(7, 4);

    let mut stepper = Stepper::new();
    let mut body = Body::new(Vec2::new(96.0, 100.0), 60.0);
    let mut machine = StateMachine::new(Traits::default());

    let dt = cfg.dt;
    for frame in 0..360u32 {
        // Scripted input: run right, hop at frame 90, slide at frame 200.
        let input = InputFrame {
            right: frame > 30,
            jump: frame == 90,
            down: (200..240).contains(&frame),
            ..Default::default()
        };

        if frame == 150 {
            crates.break_at(7, 4);
            println!("frame {frame}: crate broken");
        }

        let res = stepper.step(&mut body, &mut machine, &input, &[&level, &crates], dt, &cfg);

        if frame % 30 == 0 || res.contact != Contact::None {
            println!(
                "frame {frame:3}: {:?} pos=({:.1},{:.1}) vel=({:.0},{:.0}) contact={:?} grounded={}",
                machine.state(),
                body.pos.x,
                body.pos.y,
                body.vel.x,
                body.vel.y,
                res.contact,
                body.grounded,
            );
        }
    }
}
