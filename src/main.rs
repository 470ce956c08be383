fn main() {
    castle_combat::game::run();
}
