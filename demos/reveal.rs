use rand::thread_rng;
use unique_paths::cell;
use unique_paths::session::{Settings, Visualizer};

// Drives the visualizer session the way a front end would: paint a wall with one drag, move
// the end marker and reveal the shortest path frame by frame. Run with RUST_LOG=debug to see
// the session log.

fn draw(visualizer: &Visualizer, visible: &[grid_util::point::Point]) {
    let grid = visualizer.grid();
    let (start, end) = visualizer.endpoints();
    let text = grid.to_string();
    for (y, line) in text.lines().enumerate() {
        let row: String = line
            .chars()
            .enumerate()
            .map(|(x, c)| {
                let p = cell(y as i32, x as i32);
                if p == start {
                    'S'
                } else if p == end {
                    'E'
                } else if visible.contains(&p) {
                    '*'
                } else {
                    c
                }
            })
            .collect();
        println!("{}", row);
    }
    println!();
}

fn main() {
    env_logger::init();
    let mut visualizer = Visualizer::new(Settings {
        rows: 8,
        cols: 8,
        ..Settings::default()
    });

    visualizer.press(cell(0, 4));
    for row in 1..7 {
        visualizer.enter(cell(row, 4));
    }
    visualizer.release();

    visualizer.press(cell(7, 7));
    visualizer.enter(cell(2, 6));
    visualizer.release();

    let delay = visualizer.settings().reveal_delay;
    match visualizer.start_reveal(&mut thread_rng()) {
        Some(reveal) => {
            for frame in reveal.paced(delay) {
                println!("Step {}", frame.step + 1);
                draw(&visualizer, &frame.visible);
            }
        }
        None => println!("No path possible"),
    }
}
