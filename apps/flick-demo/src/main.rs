mod host;
mod script;

use std::rc::Rc;

use flickable_animation::FrameAnimationService;
use flickable_core::{EventStream, Point, Runtime, Size};
use flickable_dialog::{ContentDescriptor, FlickableDialog, ModalEvent};

use host::MemoryWindow;
use script::{Player, Step};

const CARD_ORIGIN: Point = Point::new(40.0, 400.0);
const CARD_SIZE: Size = Size::new(640.0, 480.0);

fn init_logging() {
    #[cfg(all(feature = "logging", not(target_arch = "wasm32")))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();
}

fn main() {
    init_logging();

    println!("=== Flickable Dialog Demo ===");
    println!("Replays scripted gestures against an in-memory window:");
    println!("  - a short drag snaps back to where it started");
    println!("  - a long drag throws the card away");
    println!("  - a tap outside fades the scrim and cancels");
    println!("  - the back key cancels a cancelable dialog");
    println!();

    let scenarios: [(&str, bool, Vec<Step>); 4] = [
        (
            "snap back",
            false,
            vec![
                Step::Down(360.0, 700.0),
                Step::DragBy(180.0, -90.0),
                Step::Up,
                Step::Wait(400),
            ],
        ),
        (
            "flick away",
            false,
            vec![
                Step::Down(360.0, 500.0),
                Step::DragBy(-820.0, -260.0),
                Step::Up,
                Step::Wait(500),
            ],
        ),
        (
            "tap outside",
            false,
            vec![Step::Wait(250), Step::BackdropTap, Step::Wait(400)],
        ),
        ("back key", true, vec![Step::Wait(100), Step::Back]),
    ];

    for (name, cancelable, steps) in scenarios {
        if let Err(err) = run_scenario(name, cancelable, &steps) {
            log::error!("scenario '{name}' failed: {err}");
        }
    }
}

fn run_scenario(
    name: &str,
    cancelable: bool,
    steps: &[Step],
) -> Result<(), Box<dyn std::error::Error>> {
    println!("--- {name} ---");
    let runtime = Runtime::default();
    let events = EventStream::<ModalEvent>::new();
    let window = Rc::new(MemoryWindow::new(CARD_ORIGIN, CARD_SIZE));

    let dialog = FlickableDialog::builder()
        .content(ContentDescriptor::new("demo_card"))
        .cancelable(cancelable)
        .build_dialog()?;
    dialog.set_on_flicking(|horizontal, vertical| {
        log::trace!("progress {horizontal:.2}, {vertical:.2}");
    });
    dialog.set_on_origin_back(|| println!("  back at origin"));
    dialog.set_on_flick(|direction| println!("  flicked {direction}"));
    dialog.set_on_cancel(|| println!("  cancelled"));

    dialog.show(
        window.clone(),
        &events,
        Rc::new(FrameAnimationService::new(runtime.handle())),
        runtime.frame_clock(),
    )?;

    let mut player = Player::new(&runtime, &events);
    player.play(steps);
    player.settle();

    println!("  card: {}", window.card.describe());
    println!(
        "  scrim alpha {:.2}, root alpha {:.2}, window open: {}, phase {:?}",
        window.scrim.alpha(),
        window.root.alpha(),
        window.is_open(),
        dialog.phase()
    );
    println!(
        "  {} frames in {:.0} ms",
        player.frames(),
        player.elapsed_millis()
    );
    println!();
    Ok(())
}
