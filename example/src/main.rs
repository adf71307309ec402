fn main() -> std::io::Result<()> {
    example::run()
}
