use cellwriter::errcode::ERR_UNKNOWN_OP;
use cellwriter::{tag_name, to_text, write, write_to_cell, Cell, Heap};

#[test]
fn lists_render_canonically() {
    let mut heap = Heap::new(256);
    let a = heap.symbol("a").unwrap();
    let b = heap.symbol("b").unwrap();
    let c = heap.symbol("c").unwrap();
    let list = heap.list(&[Some(a), Some(b), Some(c)]).unwrap();
    let dotted = heap.cons(Some(a), Some(b)).unwrap();

    let mut buf = [0u8; 64];
    assert_eq!(write(&heap, Some(list), &mut buf), b"(a b c)");
    assert_eq!(write(&heap, Some(dotted), &mut buf), b"(a.b)");
    assert!(!to_text(&heap, Some(list), 64).contains("nil"));
}

#[test]
fn closures_errors_and_blobs() {
    let mut heap = Heap::new(256);
    let x = heap.symbol("x").unwrap();
    let f = heap.lambda(&["x", "y"], Some(x)).unwrap();
    let err = heap.error(ERR_UNKNOWN_OP).unwrap();
    let odd = heap.error(99).unwrap();
    let blob = heap.bytes(&[0x0a, 0xff]).unwrap();

    assert_eq!(to_text(&heap, Some(f), 64), "(fn x y  x)");
    assert_eq!(to_text(&heap, Some(err), 64), "<e2:unknown operation.>");
    assert_eq!(to_text(&heap, Some(odd), 64), "<e99:unknown>");
    assert_eq!(to_text(&heap, Some(blob), 64), "[0aff]");
}

#[test]
fn rendering_a_cell_into_another_cell() {
    let mut heap = Heap::new(256);
    let fs_cell = heap.filesystem("/sd").unwrap();
    let fs = heap.fs_of(fs_cell).unwrap();
    let stream = heap.stream("/sd/notes.txt", fs).unwrap();
    let dest = heap.buffer(64).unwrap();

    write_to_cell(&mut heap, Some(stream), dest);
    let text = heap.get(dest).and_then(Cell::text).unwrap();
    assert_eq!(text, b"<stream:0:/sd/notes.txt:/sd>");
}

#[test]
fn every_capacity_is_safe() {
    let mut heap = Heap::new(256);
    let s = heap.string("a string that will not fit").unwrap();
    let blob = heap.bytes(&[0xab; 20]).unwrap();
    let list = heap.list(&[Some(s), Some(blob)]).unwrap();
    let full = to_text(&heap, Some(list), 1024);

    for cap in 1..=full.len() + 2 {
        let mut buf = vec![0xffu8; cap + 4];
        let n = write(&heap, Some(list), &mut buf[..cap]).len();
        assert!(n < cap);
        assert_eq!(buf[n], 0);
        assert!(buf[cap..].iter().all(|&b| b == 0xff), "wrote past capacity {}", cap);
    }
}

#[test]
fn classifier_names_tags() {
    let mut heap = Heap::new(8);
    let n = heap.int(1).unwrap();
    let raw = heap.get(n).unwrap().raw_tag();
    assert_eq!(tag_name(raw), "int");
    assert_eq!(tag_name(12345), "unknown");
}
