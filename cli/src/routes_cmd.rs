use owo_colors::OwoColorize;
use skyfare_core::POPULAR_ROUTES;

pub fn run_routes() {
    println!("{}", "Popular routes".bold());
    for route in POPULAR_ROUTES {
        println!(
            "  {} → {}  {}",
            route.origin.bold(),
            route.destination.bold(),
            route.label
        );
    }
    println!();
    println!(
        "{}",
        "Search one with: skyfare search --from <CODE> --to <CODE> --depart <DATE>".dimmed()
    );
}
