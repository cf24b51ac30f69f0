fn main() {
    update_tzdata::update_tzdata_main();
}
