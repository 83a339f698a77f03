use std::{collections::BTreeMap, env};

// cargo run --example parse_header -- "theme=dark; lang=en%2DGB; flag; theme=light"
fn main() {
    let header = env::args()
        .nth(1)
        .unwrap_or_else(|| String::from("theme=dark; lang=en%2DGB; flag; theme=light"));

    match crumb::parse(&header) {
        Ok(cookies) => {
            let sorted: BTreeMap<_, _> = cookies.into_iter().collect();
            for (name, value) in sorted {
                println!("{:?} = {:?}", name, value);
            }
        }
        Err(err) => eprintln!("error: {}", err),
    }
}
