use std::sync::{Arc, Mutex};
use waymark::prelude::*;

/// Example of driving the marker engine headless, without a map UI.
///
/// Wires the controller to in-memory storage, a logging surface, and a
/// collecting marker hook, then walks through the interactions a page
/// would forward: clicks, a search, a deletion.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    println!("Waymark headless demo");
    println!("=====================");

    let config = ControllerConfig::default();
    println!(
        "Initial viewport: {} @ zoom {}",
        config.map.initial_center, config.map.initial_zoom
    );

    // Host-side collection of confirmed markers, as the surrounding page
    // would do through its onMarkerAdd hook.
    let collected: Arc<Mutex<Vec<Marker>>> = Arc::default();
    let sink = Arc::clone(&collected);

    let controller = MarkerController::new(
        Arc::new(NominatimClient::new()),
        Arc::new(NullSurface),
        Arc::new(UnsupportedGeolocation),
        MarkerStore::new(Arc::new(MemoryStorage::new())),
        Arc::new(move |marker| {
            sink.lock().unwrap().push(marker);
        }),
    );
    controller.load().await;

    // Clicks reverse-geocode against the live Nominatim instance; offline
    // they degrade to coordinate labels instead of failing.
    let clicks = [
        (55.7539, 37.6208), // Red Square
        (48.8584, 2.2945),  // Eiffel Tower
    ];
    for (lat, lng) in clicks {
        controller.on_map_click(lat, lng).await;
    }

    for (i, marker) in controller.markers().await.iter().enumerate() {
        println!("  {}. {} @ {}", i + 1, marker.address, marker.position());
    }

    controller.on_search_input("Trafalgar Square").await;
    tokio::time::sleep(config.search_debounce * 2).await;
    let suggestions = controller.suggestions().await;
    println!("Search returned {} suggestions", suggestions.len());
    if let Some(first) = suggestions.first() {
        controller.on_suggestion_select(first).await;
        println!("Jumped to {:?}", first.display_name);
    }

    controller.on_delete_marker(0).await;

    let snapshot = controller.snapshot().await;
    println!(
        "Saved places: {}/{}",
        snapshot.markers.len(),
        snapshot.max_markers
    );
    println!(
        "Host collected {} marker notifications",
        collected.lock().unwrap().len()
    );

    Ok(())
}
