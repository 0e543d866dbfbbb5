//! Plane Layout Binding
//!
//! Reconciles how a buffer's memory is split into blocks with the frame's
//! logical planes, and produces the per-plane DMA addressing a blitter
//! surface needs.
//!
//! Two block layouts are supported: one block holding every plane at its
//! offset, or one block per plane. Strides and offsets come from the
//! buffer's [`VideoMeta`](crate::buffer::VideoMeta) when it has one, from
//! the stream's [`VideoInfo`] otherwise.

use imx2d_format::VideoInfo;
use tracing::{error, trace};

use crate::buffer::{BlockLayout, DmaHandle, DmaMemory, PlaneGeometry, VideoBuffer};
use crate::error::{Result, SurfaceError};

/// DMA addressing of one plane
#[derive(Debug)]
pub struct SurfacePlane<'a, M> {
    /// Memory block the plane lives in
    pub memory: &'a M,
    /// Physical address of `memory`
    pub dma_handle: DmaHandle,
    /// Bytes per row of the plane
    pub stride: u32,
    /// Byte offset of the plane within `memory`
    pub offset: usize,
}

/// Everything a blitter surface needs to address a frame
#[derive(Debug)]
pub struct SurfaceDescriptor<'a, M> {
    /// One entry per plane, in plane order
    pub planes: Vec<SurfacePlane<'a, M>>,
    /// Rows between the logical picture and the end of the frame
    pub num_padding_rows: u32,
}

/// Check that a buffer's block count is usable for `plane_count` planes
///
/// Either one block for all planes or one block per plane is accepted.
pub fn check_input_buffer_structure(block_count: usize, plane_count: usize) -> Result<()> {
    if block_count == 1 {
        trace!("input buffer has one single memory block for all planes");
        return Ok(());
    }

    if block_count != plane_count {
        error!(
            "input buffer has an unsupported number of memory blocks ({} blocks for {} planes)",
            block_count, plane_count
        );
        return Err(SurfaceError::layout_mismatch(block_count, plane_count));
    }

    Ok(())
}

fn dma_handle_of<M: DmaMemory>(memory: &M, plane: usize) -> Result<DmaHandle> {
    memory
        .dma_handle()
        .ok_or(SurfaceError::NotDmaBacked { plane })
}

/// Describe an input buffer's planes for the blitter
///
/// With one block per plane, each plane starts at offset 0 of its own block.
/// With a single block, every plane is addressed in that block at its
/// offset.
///
/// # Errors
///
/// [`SurfaceError::MissingMemory`] if the buffer has no blocks,
/// [`SurfaceError::LayoutMismatch`] if there are several blocks but not one
/// per plane,
/// [`SurfaceError::NotDmaBacked`] if a block has no DMA handle.
///
/// # Panics
///
/// Panics if the frame has fewer rows than its logical height. Buffers
/// that reach the blitter must hold at least the whole picture.
pub fn assign_input_buffer<'a, B>(
    buffer: &'a B,
    input_info: &VideoInfo,
) -> Result<SurfaceDescriptor<'a, B::Memory>>
where
    B: VideoBuffer,
{
    let blocks = BlockLayout::classify(buffer.memory_blocks()).ok_or(SurfaceError::MissingMemory)?;
    let geometry = PlaneGeometry::select(buffer.video_meta(), input_info);
    let layout = geometry.layout();

    let planes = match blocks {
        BlockLayout::PerPlane(blocks) => {
            check_input_buffer_structure(blocks.len(), layout.num_planes())?;

            blocks
                .iter()
                .zip(layout.planes())
                .enumerate()
                .map(|(index, (memory, plane))| -> Result<SurfacePlane<'a, B::Memory>> {
                    let dma_handle = dma_handle_of(memory, index)?;

                    trace!(
                        "input plane #{} info from {}:  stride: {}  offset: {}  dma handle: {:#x}",
                        index,
                        geometry.source_name(),
                        plane.stride,
                        plane.offset,
                        dma_handle.0
                    );

                    // Each block holds exactly one plane, so the declared
                    // offsets do not apply
                    Ok(SurfacePlane {
                        memory,
                        dma_handle,
                        stride: plane.stride,
                        offset: 0,
                    })
                })
                .collect::<Result<Vec<_>>>()?
        }

        BlockLayout::Single(memory) => {
            let dma_handle = dma_handle_of(memory, 0)?;
            trace!("using DMA handle {:#x} for all input planes", dma_handle.0);

            layout
                .planes()
                .iter()
                .enumerate()
                .map(|(index, plane)| {
                    trace!(
                        "input plane #{} info from {}:  stride: {}  offset: {}",
                        index,
                        geometry.source_name(),
                        plane.stride,
                        plane.offset
                    );

                    SurfacePlane {
                        memory,
                        dma_handle,
                        stride: plane.stride,
                        offset: plane.offset,
                    }
                })
                .collect()
        }
    };

    let total_rows = layout.total_frame_rows();
    let height = geometry.height();
    assert!(
        total_rows >= height,
        "frame has {total_rows} rows but a logical height of {height}"
    );
    let num_padding_rows = total_rows - height;

    trace!(
        "total num input plane rows: {}  height: {}  -> num padding rows: {}",
        total_rows,
        height,
        num_padding_rows
    );

    Ok(SurfaceDescriptor {
        planes,
        num_padding_rows,
    })
}

/// Describe an output buffer's planes for the blitter
///
/// The output layout is dictated by `output_info`. If the buffer carries
/// metadata, its strides and offsets are overwritten to match so downstream
/// sees what the blitter writes. Every plane is addressed in the first
/// memory block.
///
/// # Errors
///
/// [`SurfaceError::MissingMemory`] if the buffer has no blocks,
/// [`SurfaceError::NotDmaBacked`] if the first block has no DMA handle. The
/// metadata is left untouched in both cases.
pub fn assign_output_buffer<'a, B>(
    buffer: &'a mut B,
    output_info: &VideoInfo,
) -> Result<SurfaceDescriptor<'a, B::Memory>>
where
    B: VideoBuffer,
{
    let dma_handle = {
        let memory = buffer.memory_blocks().first().ok_or(SurfaceError::MissingMemory)?;
        dma_handle_of(memory, 0)?
    };

    if let Some(meta) = buffer.video_meta_mut() {
        for (meta_plane, info_plane) in meta
            .layout
            .planes_mut()
            .iter_mut()
            .zip(output_info.layout.planes())
        {
            meta_plane.stride = info_plane.stride;
            meta_plane.offset = info_plane.offset;
        }
    }

    let buffer: &'a B = buffer;
    let memory = buffer.memory_blocks().first().ok_or(SurfaceError::MissingMemory)?;

    let planes = output_info
        .layout
        .planes()
        .iter()
        .enumerate()
        .map(|(index, plane)| {
            trace!(
                "output plane #{} info:  stride: {}  offset: {}",
                index,
                plane.stride,
                plane.offset
            );

            SurfacePlane {
                memory,
                dma_handle,
                stride: plane.stride,
                offset: plane.offset,
            }
        })
        .collect();

    Ok(SurfaceDescriptor {
        planes,
        num_padding_rows: 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::VideoMeta;
    use imx2d_format::{PixelFormat, PlaneLayout};

    #[derive(Debug, PartialEq)]
    struct Block(Option<u64>);

    impl DmaMemory for Block {
        fn dma_handle(&self) -> Option<DmaHandle> {
            self.0.map(DmaHandle)
        }
    }

    struct Buffer {
        blocks: Vec<Block>,
        meta: Option<VideoMeta>,
    }

    impl VideoBuffer for Buffer {
        type Memory = Block;

        fn memory_blocks(&self) -> &[Block] {
            &self.blocks
        }

        fn video_meta(&self) -> Option<&VideoMeta> {
            self.meta.as_ref()
        }

        fn video_meta_mut(&mut self) -> Option<&mut VideoMeta> {
            self.meta.as_mut()
        }
    }

    fn nv12_info() -> VideoInfo {
        VideoInfo::new(PixelFormat::NV12, 1920, 1080).expect("NV12 is known")
    }

    #[test]
    fn test_check_input_buffer_structure() {
        assert!(check_input_buffer_structure(1, 3).is_ok());
        assert!(check_input_buffer_structure(3, 3).is_ok());
        assert!(check_input_buffer_structure(1, 1).is_ok());
        assert_eq!(
            check_input_buffer_structure(2, 3),
            Err(SurfaceError::LayoutMismatch { blocks: 2, planes: 3 })
        );
        assert!(check_input_buffer_structure(0, 2).is_err());
    }

    #[test]
    fn test_single_block_uses_info_offsets() {
        let info = nv12_info();
        let buffer = Buffer {
            blocks: vec![Block(Some(0x1000))],
            meta: None,
        };

        let desc = assign_input_buffer(&buffer, &info).expect("valid buffer");

        assert_eq!(desc.planes.len(), 2);
        assert_eq!(desc.planes[0].offset, 0);
        assert_eq!(desc.planes[1].offset, 2_073_600);
        assert!(desc.planes.iter().all(|p| p.dma_handle == DmaHandle(0x1000)));
        assert!(desc.planes.iter().all(|p| std::ptr::eq(p.memory, &buffer.blocks[0])));
        assert_eq!(desc.num_padding_rows, 0);
    }

    #[test]
    fn test_per_plane_blocks_zero_offsets() {
        let info = nv12_info();
        let buffer = Buffer {
            blocks: vec![Block(Some(0x1000)), Block(Some(0x8000))],
            meta: None,
        };

        let desc = assign_input_buffer(&buffer, &info).expect("valid buffer");

        assert_eq!(desc.planes[0].dma_handle, DmaHandle(0x1000));
        assert_eq!(desc.planes[1].dma_handle, DmaHandle(0x8000));
        assert!(desc.planes.iter().all(|p| p.offset == 0));
        assert_eq!(desc.planes[1].stride, 1920);
    }

    #[test]
    fn test_meta_overrides_info() {
        let info = nv12_info();
        let meta = VideoMeta {
            width: 1920,
            height: 1080,
            layout: imx2d_format::FrameLayout::new(vec![
                PlaneLayout { stride: 2048, offset: 0, rows: 1088 },
                PlaneLayout { stride: 2048, offset: 2048 * 1088, rows: 544 },
            ]),
        };
        let buffer = Buffer {
            blocks: vec![Block(Some(0x2000))],
            meta: Some(meta),
        };

        let desc = assign_input_buffer(&buffer, &info).expect("valid buffer");

        assert_eq!(desc.planes[0].stride, 2048);
        assert_eq!(desc.planes[1].offset, 2048 * 1088);
        assert_eq!(desc.num_padding_rows, 8);
    }

    #[test]
    fn test_per_plane_blocks_ignore_meta_offsets() {
        let info = nv12_info();
        let meta = VideoMeta {
            width: 1920,
            height: 1080,
            layout: imx2d_format::FrameLayout::new(vec![
                PlaneLayout { stride: 2048, offset: 0, rows: 1088 },
                PlaneLayout { stride: 2048, offset: 2048 * 1088, rows: 544 },
            ]),
        };
        let buffer = Buffer {
            blocks: vec![Block(Some(0x1000)), Block(Some(0x9000))],
            meta: Some(meta),
        };

        let desc = assign_input_buffer(&buffer, &info).expect("valid buffer");

        assert_eq!(desc.planes.len(), 2);
        assert!(desc.planes.iter().all(|p| p.offset == 0));
        assert!(desc.planes.iter().all(|p| p.stride == 2048));
        assert_eq!(desc.planes[1].dma_handle, DmaHandle(0x9000));
        assert!(std::ptr::eq(desc.planes[1].memory, &buffer.blocks[1]));
        assert_eq!(desc.num_padding_rows, 8);
    }

    #[test]
    fn test_extra_blocks_rejected() {
        let info = nv12_info();
        let buffer = Buffer {
            blocks: vec![Block(Some(0x1000)), Block(Some(0x2000)), Block(Some(0x3000))],
            meta: None,
        };

        assert_eq!(
            assign_input_buffer(&buffer, &info).map(|_| ()),
            Err(SurfaceError::LayoutMismatch { blocks: 3, planes: 2 })
        );
    }

    #[test]
    fn test_input_errors() {
        let info = nv12_info();

        let empty = Buffer { blocks: Vec::new(), meta: None };
        assert_eq!(
            assign_input_buffer(&empty, &info).map(|_| ()),
            Err(SurfaceError::MissingMemory)
        );

        let system = Buffer {
            blocks: vec![Block(Some(0x1000)), Block(None)],
            meta: None,
        };
        assert_eq!(
            assign_input_buffer(&system, &info).map(|_| ()),
            Err(SurfaceError::NotDmaBacked { plane: 1 })
        );

        let info = VideoInfo::new(PixelFormat::I420, 640, 480).expect("I420 is known");
        let short = Buffer {
            blocks: vec![Block(Some(0x1000)), Block(Some(0x2000))],
            meta: None,
        };
        assert_eq!(
            assign_input_buffer(&short, &info).map(|_| ()),
            Err(SurfaceError::LayoutMismatch { blocks: 2, planes: 3 })
        );
    }

    #[test]
    #[should_panic(expected = "logical height")]
    fn test_negative_padding_panics() {
        let info = nv12_info();
        let mut meta = VideoMeta::from_info(&info);
        meta.height = 1200;

        let buffer = Buffer {
            blocks: vec![Block(Some(0x1000))],
            meta: Some(meta),
        };

        let _ = assign_input_buffer(&buffer, &info);
    }

    #[test]
    fn test_output_writes_meta() {
        let info = nv12_info();
        let mut stale = VideoMeta::from_info(&info);
        for plane in stale.layout.planes_mut() {
            plane.stride = 1;
            plane.offset = 7;
        }

        let mut buffer = Buffer {
            blocks: vec![Block(Some(0x4000)), Block(Some(0x5000))],
            meta: Some(stale),
        };

        let desc = assign_output_buffer(&mut buffer, &info).expect("valid buffer");
        assert_eq!(desc.num_padding_rows, 0);
        assert!(desc.planes.iter().all(|p| p.dma_handle == DmaHandle(0x4000)));
        assert_eq!(desc.planes[1].offset, 2_073_600);

        let meta = buffer.meta.as_ref().expect("meta kept");
        assert_eq!(meta.layout.planes()[0].stride, 1920);
        assert_eq!(meta.layout.planes()[1].offset, 2_073_600);
    }

    #[test]
    fn test_output_errors_leave_meta() {
        let info = nv12_info();
        let mut stale = VideoMeta::from_info(&info);
        stale.layout.planes_mut()[0].stride = 1;

        let mut buffer = Buffer {
            blocks: vec![Block(None)],
            meta: Some(stale),
        };

        assert_eq!(
            assign_output_buffer(&mut buffer, &info).map(|_| ()),
            Err(SurfaceError::NotDmaBacked { plane: 0 })
        );
        assert_eq!(buffer.meta.as_ref().map(|m| m.layout.planes()[0].stride), Some(1));

        let mut empty = Buffer { blocks: Vec::new(), meta: None };
        assert_eq!(
            assign_output_buffer(&mut empty, &info).map(|_| ()),
            Err(SurfaceError::MissingMemory)
        );
    }
}
