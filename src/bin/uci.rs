use floe_engine::engine::Engine;
use floe_engine::uci::uci_loop;

fn main() {
    let mut engine = Engine::new();
    uci_loop(&mut engine);
}
