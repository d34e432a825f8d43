use vfs_resolver::{Replacements, VfsHandler, VfsManager};

fn main() {
    let tmp = std::env::temp_dir();
    println!("Temp dir: {}", tmp.display());

    // binds `foo:/` to the temp dir; the root folder must already exist
    let mut handler = VfsHandler::new("Test 1");
    handler.set_protocol("foo", ":/");
    handler.set_root_folder(tmp.to_str().unwrap()).unwrap();
    handler.add_replacement("myReplacement", "Blub");

    let mut manager = VfsManager::with_handler(handler);

    // `<tmp>/bar/bazz.txt`
    println!("{}", manager.resolve("foo:/bar/bazz.txt"));

    // `<tmp>/abc/def/bazz.txt`;
    // from now on the handler also knows `myDynamicReplacement`
    let dynamic = Replacements::new().with("myDynamicReplacement", "abc/def");
    println!(
        "{}",
        manager.resolve_path("foo:/${myDynamicReplacement}/bazz.txt", &dynamic)
    );

    // `<tmp>/Bar/Bazz/Blub.xml`
    println!("{}", manager.resolve("foo:/Bar/Bazz/${myReplacement}.xml"));

    // no handler for `xyz://`, returned as is
    println!("{}", manager.resolve("xyz://bar"));
}
