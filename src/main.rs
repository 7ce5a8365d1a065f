fn main() {
    hoc::term::main();
}
